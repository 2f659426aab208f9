//! Weapon state machine: commands and event handlers
//!
//! Everything here runs off scheduled events. A command (`ready_weapon`,
//! `start_attack`) only queues the first hop; each handler then completes
//! its transition and queues the next one. Handlers do their arithmetic
//! from the tick the event was scheduled for, so a chain's timing is
//! exact regardless of when the queue drains.
//!
//! The hop delay is always the duration of the state being left: a
//! pistol spends drawing's 30 ticks *in* drawing before the transition
//! to ready completes.

use rand::Rng;
use tracing::debug;

use crate::combat::resolver::{self, HitDetail, ShotResult};
use crate::combat::wounds::Wound;
use crate::core::constants::{pixels_to_feet, PIXELS_PER_FOOT};
use crate::core::error::{FirelineError, Result};
use crate::core::types::{OwnerId, Tick, UnitId};
use crate::entity::character::AimingSpeed;
use crate::entity::unit::Unit;
use crate::entity::weapon::{states, Weapon};
use crate::simulation::events::{AdvanceGoal, CombatEvent, CombatSignal, HighlightKind};
use crate::simulation::world::World;

/// Delay for a preparation hop, scaled by reflexes and quickdraw
fn prep_delay(ticks: u32, ready_speed_multiplier: f64) -> Tick {
    (f64::from(ticks) * ready_speed_multiplier).round() as Tick
}

/// Delay before the shot breaks, scaled by how deliberately the
/// character aims
fn aim_delay(ticks: u32, aiming_speed: AimingSpeed) -> Tick {
    (f64::from(ticks) * aiming_speed.timing_multiplier()).round() as Tick
}

fn unit_ref(world: &World, id: UnitId) -> Result<&Unit> {
    world
        .units
        .get(id.index())
        .ok_or(FirelineError::UnitNotFound(id))
}

fn unit_mut(world: &mut World, id: UnitId) -> Result<&mut Unit> {
    world
        .units
        .get_mut(id.index())
        .ok_or(FirelineError::UnitNotFound(id))
}

/// Bring the weapon from its carry state up to ready
///
/// Silent no-op when unarmed or already at ready or beyond.
pub fn ready_weapon(world: &mut World, unit_id: UnitId) -> Result<()> {
    let now = world.clock.current();
    let unit = unit_ref(world, unit_id)?;
    let character = &unit.character;
    if character.is_incapacitated() {
        return Ok(());
    }
    let Some(weapon) = &character.weapon else {
        debug!(unit = ?unit_id, "ready_weapon ignored, no weapon");
        return Ok(());
    };
    let state_name = character.weapon_state.as_str();
    if matches!(
        state_name,
        states::READY | states::AIMING | states::FIRING | states::RECOVERING
    ) {
        return Ok(());
    }
    let Some(state) = weapon.state(state_name) else {
        return Ok(());
    };
    let delay = prep_delay(state.ticks, character.ready_speed_multiplier());
    world.scheduler.schedule(
        now,
        now + delay,
        OwnerId::Unit(unit_id),
        CombatEvent::StateAdvance {
            unit: unit_id,
            goal: AdvanceGoal::Ready,
        },
    )
}

/// Commit to shooting a target
///
/// Repeated calls against the same target while an attack is in flight
/// queue additional shots instead of restarting the chain. Switching
/// targets mid-aim drops back to ready first.
pub fn start_attack(world: &mut World, shooter_id: UnitId, target_id: UnitId) -> Result<()> {
    let now = world.clock.current();
    unit_ref(world, target_id)?;
    let unit = unit_mut(world, shooter_id)?;
    let character = &mut unit.character;
    if character.is_incapacitated() {
        return Ok(());
    }
    if character.weapon.is_none() {
        debug!(unit = ?shooter_id, "start_attack ignored, no weapon");
        return Ok(());
    }

    if character.current_target == Some(target_id) && character.queued_shots > 0 {
        character.queued_shots += 1;
        debug!(
            unit = ?shooter_id,
            queued = character.queued_shots,
            "queued another shot"
        );
        return Ok(());
    }

    if character.weapon_state == states::AIMING && character.current_target != Some(target_id) {
        character.weapon_state = states::READY.to_string();
    }
    character.current_target = Some(target_id);
    character.queued_shots = 1;
    let mid_cycle = matches!(
        character.weapon_state.as_str(),
        states::FIRING | states::RECOVERING
    );

    // Restarting the walk obsoletes any hop or shot already queued for
    // this unit. A weapon mid-cycle keeps its events; the reaim handler
    // picks the new target up.
    if !mid_cycle {
        world.scheduler.cancel_for_owner(OwnerId::Unit(shooter_id));
    }

    schedule_attack_progress(world, shooter_id, now)
}

/// Queue the next hop of an attack from wherever the weapon is now
fn schedule_attack_progress(world: &mut World, unit_id: UnitId, now: Tick) -> Result<()> {
    let unit = unit_ref(world, unit_id)?;
    let character = &unit.character;
    let Some(weapon) = &character.weapon else {
        return Ok(());
    };
    let state_name = character.weapon_state.as_str();

    // A firing or recovering weapon is already mid-cycle; the reaim
    // handler picks the queued shots up.
    if matches!(state_name, states::FIRING | states::RECOVERING) {
        return Ok(());
    }
    let Some(state) = weapon.state(state_name) else {
        return Ok(());
    };

    if state_name == states::AIMING {
        let delay = aim_delay(state.ticks, character.aiming_speed);
        world.scheduler.schedule(
            now,
            now + delay,
            OwnerId::Unit(unit_id),
            CombatEvent::Fire { unit: unit_id },
        )
    } else {
        let delay = prep_delay(state.ticks, character.ready_speed_multiplier());
        world.scheduler.schedule(
            now,
            now + delay,
            OwnerId::Unit(unit_id),
            CombatEvent::StateAdvance {
                unit: unit_id,
                goal: AdvanceGoal::Attack,
            },
        )
    }
}

/// Complete a state transition and keep walking toward the goal
pub(crate) fn handle_state_advance(
    world: &mut World,
    unit_id: UnitId,
    goal: AdvanceGoal,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    let (next, next_ticks, ready_mult, aiming_speed) = {
        let unit = unit_ref(world, unit_id)?;
        let character = &unit.character;
        if character.is_incapacitated() {
            return Ok(());
        }
        let Some(weapon) = &character.weapon else {
            return Ok(());
        };
        let Some(current) = weapon.state(&character.weapon_state) else {
            return Ok(());
        };
        let next = current.next.clone();
        let next_ticks = weapon.state(&next).map(|s| s.ticks);
        (
            next,
            next_ticks,
            character.ready_speed_multiplier(),
            character.aiming_speed,
        )
    };

    unit_mut(world, unit_id)?.character.weapon_state = next.clone();
    debug!(unit = ?unit_id, state = %next, tick = t, "weapon state transition");
    signals.push(CombatSignal::WeaponStateChanged {
        unit: unit_id,
        state: next.clone(),
    });

    let Some(next_ticks) = next_ticks else {
        return Ok(());
    };

    match goal {
        AdvanceGoal::Ready => {
            if next == states::READY {
                return Ok(());
            }
            world.scheduler.schedule(
                t,
                t + prep_delay(next_ticks, ready_mult),
                OwnerId::Unit(unit_id),
                CombatEvent::StateAdvance {
                    unit: unit_id,
                    goal: AdvanceGoal::Ready,
                },
            )
        }
        AdvanceGoal::Attack => {
            if next == states::AIMING {
                world.scheduler.schedule(
                    t,
                    t + aim_delay(next_ticks, aiming_speed),
                    OwnerId::Unit(unit_id),
                    CombatEvent::Fire { unit: unit_id },
                )
            } else {
                world.scheduler.schedule(
                    t,
                    t + prep_delay(next_ticks, ready_mult),
                    OwnerId::Unit(unit_id),
                    CombatEvent::StateAdvance {
                        unit: unit_id,
                        goal: AdvanceGoal::Attack,
                    },
                )
            }
        }
    }
}

/// The shot breaks: resolve it at fire time and put the bullet in the air
pub(crate) fn handle_fire(
    world: &mut World,
    unit_id: UnitId,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    // Immutable phase: gather everything the shot needs.
    let shot = {
        let unit = unit_ref(world, unit_id)?;
        let character = &unit.character;
        if character.is_incapacitated() {
            return Ok(());
        }
        let Some(weapon) = &character.weapon else {
            return Ok(());
        };
        let target_id = character.current_target;
        let target_alive = target_id
            .and_then(|id| world.units.get(id.index()))
            .map(|target| !target.character.is_incapacitated())
            .unwrap_or(false);

        // A dead or missing target ends the chain; stay aiming.
        match target_id.filter(|_| target_alive) {
            None => None,
            Some(target_id) => {
                let target = unit_ref(world, target_id)?;
                let chance =
                    resolver::compute_hit_chance(unit, target, weapon, &world.config);
                let distance_feet =
                    pixels_to_feet(unit.position.distance(&target.position));
                let firing_ticks = weapon
                    .state(states::FIRING)
                    .map(|s| s.ticks)
                    .unwrap_or(0);
                Some((target_id, chance, distance_feet, weapon.clone(), firing_ticks))
            }
        }
    };

    let Some((target_id, chance, distance_feet, weapon, firing_ticks)) = shot else {
        unit_mut(world, unit_id)?.character.queued_shots = 0;
        return Ok(());
    };

    unit_mut(world, unit_id)?.character.weapon_state = states::FIRING.to_string();
    signals.push(CombatSignal::WeaponStateChanged {
        unit: unit_id,
        state: states::FIRING.to_string(),
    });

    if weapon.ammunition == 0 {
        // Dry fire: no bullet, but the trigger was pulled and the
        // weapon still cycles through recovery.
        debug!(unit = ?unit_id, tick = t, "dry fire, no ammunition");
        signals.push(CombatSignal::NoAmmunition { unit: unit_id });
    } else {
        let shooter = unit_mut(world, unit_id)?;
        if let Some(carried) = shooter.character.weapon.as_mut() {
            carried.ammunition -= 1;
        }
        shooter.firing_highlighted = true;
        signals.push(CombatSignal::Fired {
            shooter: unit_id,
            target: target_id,
        });

        let result = resolver::resolve_shot(chance, weapon.damage, &mut world.rng);
        debug!(
            shooter = ?unit_id,
            target = ?target_id,
            chance,
            ?result,
            tick = t,
            "shot resolved"
        );

        let firing_highlight = world.config.firing_highlight_ticks;
        world.scheduler.schedule(
            t,
            t + firing_highlight,
            OwnerId::World,
            CombatEvent::HighlightRevert {
                unit: unit_id,
                kind: HighlightKind::Firing,
            },
        )?;
        world.scheduler.schedule(
            t,
            t + resolver::impact_delay(distance_feet, weapon.velocity_feet_per_second),
            OwnerId::World,
            CombatEvent::Impact {
                shooter: unit_id,
                target: target_id,
                result,
                weapon,
            },
        )?;
    }

    world.scheduler.schedule(
        t,
        t + Tick::from(firing_ticks),
        OwnerId::Unit(unit_id),
        CombatEvent::Recover { unit: unit_id },
    )
}

/// Firing finished; begin recovery
pub(crate) fn handle_recover(
    world: &mut World,
    unit_id: UnitId,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    let recovering_ticks = {
        let unit = unit_ref(world, unit_id)?;
        if unit.character.is_incapacitated() {
            return Ok(());
        }
        let Some(weapon) = &unit.character.weapon else {
            return Ok(());
        };
        weapon
            .state(states::RECOVERING)
            .map(|s| s.ticks)
            .unwrap_or(0)
    };

    unit_mut(world, unit_id)?.character.weapon_state = states::RECOVERING.to_string();
    signals.push(CombatSignal::WeaponStateChanged {
        unit: unit_id,
        state: states::RECOVERING.to_string(),
    });

    world.scheduler.schedule(
        t,
        t + Tick::from(recovering_ticks),
        OwnerId::Unit(unit_id),
        CombatEvent::Reaim { unit: unit_id },
    )
}

/// Recovery finished; settle back into aiming and fire again if shots
/// remain queued
pub(crate) fn handle_reaim(
    world: &mut World,
    unit_id: UnitId,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    let (remaining, target_alive, aiming_ticks, aiming_speed) = {
        let unit = unit_mut(world, unit_id)?;
        if unit.character.is_incapacitated() {
            return Ok(());
        }
        unit.character.weapon_state = states::AIMING.to_string();
        unit.character.queued_shots = unit.character.queued_shots.saturating_sub(1);
        let remaining = unit.character.queued_shots;
        let aiming_speed = unit.character.aiming_speed;
        let aiming_ticks = unit
            .character
            .weapon
            .as_ref()
            .and_then(|w| w.state(states::AIMING))
            .map(|s| s.ticks)
            .unwrap_or(0);
        let target_id = unit.character.current_target;
        let target_alive = target_id
            .and_then(|id| world.units.get(id.index()))
            .map(|target| !target.character.is_incapacitated())
            .unwrap_or(false);
        (remaining, target_alive, aiming_ticks, aiming_speed)
    };

    signals.push(CombatSignal::WeaponStateChanged {
        unit: unit_id,
        state: states::AIMING.to_string(),
    });

    if remaining == 0 {
        return Ok(());
    }
    if !target_alive {
        unit_mut(world, unit_id)?.character.queued_shots = 0;
        return Ok(());
    }

    debug!(unit = ?unit_id, remaining, tick = t, "continuing queued shots");
    world.scheduler.schedule(
        t,
        t + aim_delay(aiming_ticks, aiming_speed),
        OwnerId::Unit(unit_id),
        CombatEvent::Fire { unit: unit_id },
    )
}

/// The projectile arrives; apply the result computed at fire time
pub(crate) fn handle_impact(
    world: &mut World,
    shooter_id: UnitId,
    target_id: UnitId,
    result: ShotResult,
    weapon: Weapon,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    match result {
        ShotResult::Miss => {
            signals.push(CombatSignal::Missed {
                shooter: shooter_id,
                target: target_id,
            });
            resolve_stray_shots(world, shooter_id, target_id, &weapon, t, signals)
        }
        ShotResult::Hit(detail) => apply_hit(
            world,
            shooter_id,
            target_id,
            detail,
            &weapon.name,
            &weapon.projectile_name,
            false,
            t,
            signals,
        ),
    }
}

/// Wound a unit and run the shared impact effects: highlight,
/// signalling, and incapacitation
#[allow(clippy::too_many_arguments)]
fn apply_hit(
    world: &mut World,
    shooter_id: UnitId,
    target_id: UnitId,
    detail: HitDetail,
    weapon_name: &str,
    projectile_name: &str,
    stray: bool,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    let hit_highlight = world.config.hit_highlight_ticks;
    let (need_highlight, newly_down) = {
        let target = unit_mut(world, target_id)?;
        let was_down = target.character.is_incapacitated();
        target.character.add_wound(Wound::new(
            detail.body_part,
            detail.severity,
            detail.damage,
            weapon_name,
            projectile_name,
        ));
        let newly_down = !was_down && target.character.is_incapacitated();
        let need_highlight = !target.hit_highlighted;
        target.hit_highlighted = true;
        if newly_down {
            // Movement stops dead. The weapon state, target, and
            // queued shots stay frozen exactly as they were when the
            // unit went down.
            target.move_target = None;
        }
        (need_highlight, newly_down)
    };

    if stray {
        signals.push(CombatSignal::StrayHit {
            shooter: shooter_id,
            target: target_id,
            body_part: detail.body_part,
            severity: detail.severity,
            damage: detail.damage,
        });
    } else {
        signals.push(CombatSignal::Hit {
            shooter: shooter_id,
            target: target_id,
            body_part: detail.body_part,
            severity: detail.severity,
            damage: detail.damage,
        });
    }

    if need_highlight {
        world.scheduler.schedule(
            t,
            t + hit_highlight,
            OwnerId::World,
            CombatEvent::HighlightRevert {
                unit: target_id,
                kind: HighlightKind::Hit,
            },
        )?;
    }

    if newly_down {
        let cancelled = world.scheduler.cancel_for_owner(OwnerId::Unit(target_id));
        debug!(
            unit = ?target_id,
            cancelled,
            tick = t,
            "unit incapacitated, pending actions dropped"
        );
        signals.push(CombatSignal::Incapacitated { unit: target_id });
    }

    Ok(())
}

/// Radius around the miss point inside which bystanders are at risk
/// (15 feet)
const STRAY_RADIUS_PX: f64 = 105.0;

/// A missed round keeps going; see who is standing near where it lands
fn resolve_stray_shots(
    world: &mut World,
    shooter_id: UnitId,
    target_id: UnitId,
    weapon: &Weapon,
    t: Tick,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    let (shooter_pos, target_pos) = {
        let shooter = unit_ref(world, shooter_id)?;
        let target = unit_ref(world, target_id)?;
        (shooter.position, target.position)
    };
    let line = target_pos - shooter_pos;
    let distance = line.length();
    if distance < 1e-9 {
        return Ok(());
    }

    // The round carries 10 to 30 feet past the intended target
    let overshoot = world.rng.gen::<f64>() * 140.0 + 70.0;
    let miss_point = shooter_pos + line.normalize() * (distance + overshoot);
    let max_range_px = weapon.max_range_feet * PIXELS_PER_FOOT;

    let candidates: Vec<(UnitId, f64)> = world
        .units
        .iter()
        .filter(|unit| unit.id != shooter_id && unit.id != target_id)
        .filter(|unit| unit.position.distance(&shooter_pos) <= max_range_px)
        .filter_map(|unit| {
            let to_miss = unit.position.distance(&miss_point);
            (to_miss <= STRAY_RADIUS_PX).then_some((unit.id, to_miss))
        })
        .collect();

    for (stray_id, to_miss_px) in candidates {
        let hit = resolver::resolve_stray_hit(
            pixels_to_feet(to_miss_px),
            weapon.damage,
            &mut world.rng,
        );
        if let Some(detail) = hit {
            debug!(
                shooter = ?shooter_id,
                stray = ?stray_id,
                tick = t,
                "stray round connected"
            );
            let projectile = format!("{} (stray)", weapon.projectile_name);
            apply_hit(
                world,
                shooter_id,
                stray_id,
                detail,
                &weapon.name,
                &projectile,
                true,
                t,
                signals,
            )?;
        }
    }
    Ok(())
}

/// Clear a highlight set when firing or being struck
pub(crate) fn handle_highlight_revert(
    world: &mut World,
    unit_id: UnitId,
    kind: HighlightKind,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    let unit = unit_mut(world, unit_id)?;
    match kind {
        HighlightKind::Hit => unit.hit_highlighted = false,
        HighlightKind::Firing => unit.firing_highlighted = false,
    }
    signals.push(CombatSignal::HighlightCleared {
        unit: unit_id,
        kind,
    });
    Ok(())
}
