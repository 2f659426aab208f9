//! Shot resolution: chance accumulation, the hit roll, and wound rolls
//!
//! A shot resolves in three steps. First the situational modifiers are
//! summed into a percentage chance. Then a single roll in [0, 100)
//! decides hit or miss. The same roll, measured against bands of the
//! chance, grades the hit: a roll far below the chance is a clean shot
//! that finds center mass, a marginal roll lands wherever it can.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::body_part::{BodyPart, WoundSeverity};
use crate::combat::modifiers;
use crate::core::config::ScenarioConfig;
use crate::core::constants::{pixels_to_feet, TICKS_PER_SECOND};
use crate::core::types::Tick;
use crate::entity::unit::Unit;
use crate::entity::weapon::Weapon;

/// Fraction of the chance below which a hit is an excellent shot
const EXCELLENT_BAND: f64 = 0.2;
/// Fraction of the chance below which a hit is a good shot
const GOOD_BAND: f64 = 0.7;

/// Outcome of a resolved shot, carried by the projectile until impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    Miss,
    Hit(HitDetail),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDetail {
    pub body_part: BodyPart,
    pub severity: WoundSeverity,
    pub damage: i32,
}

/// Sum every modifier into a percentage chance to hit
///
/// Within weapon range the result is floored at the configured minimum
/// so no shot is strictly impossible. Beyond maximum range the formula
/// still applies, only without the floor: the range penalty keeps
/// deepening, but a good enough shooter can still land one.
pub fn compute_hit_chance(
    shooter: &Unit,
    target: &Unit,
    weapon: &Weapon,
    config: &ScenarioConfig,
) -> f64 {
    let distance_feet = pixels_to_feet(shooter.position.distance(&target.position));
    let character = &shooter.character;
    let chance = config.base_hit_chance
        + f64::from(modifiers::stat_modifier(character.dexterity))
        + modifiers::stress_modifier(character.coolness, config.base_stress_penalty)
        + modifiers::range_modifier(distance_feet, weapon.max_range_feet)
        + f64::from(weapon.accuracy)
        + modifiers::movement_modifier(shooter.is_moving(), character.movement_type)
        + character.aiming_speed.accuracy_modifier()
        + modifiers::target_movement_modifier(target.perpendicular_speed(shooter.position))
        + modifiers::wound_modifier(&character.wounds, character.handedness)
        + modifiers::skill_modifier(character, weapon.weapon_type);

    if distance_feet <= weapon.max_range_feet {
        chance.max(config.minimum_hit_chance)
    } else {
        chance
    }
}

/// Roll the shot and, on a hit, grade location, severity, and damage
pub fn resolve_shot<R: Rng>(chance: f64, weapon_damage: i32, rng: &mut R) -> ShotResult {
    let roll = rng.gen::<f64>() * 100.0;
    if chance <= 0.0 || roll >= chance {
        return ShotResult::Miss;
    }

    let excellent = chance * EXCELLENT_BAND;
    let good = chance * GOOD_BAND;

    if roll < excellent {
        // A clean shot: center mass, maximum effect
        return ShotResult::Hit(HitDetail {
            body_part: BodyPart::Chest,
            severity: WoundSeverity::Critical,
            damage: weapon_damage,
        });
    }

    let body_part = if roll < good {
        if rng.gen::<f64>() < 0.5 {
            BodyPart::Chest
        } else {
            BodyPart::Abdomen
        }
    } else {
        random_body_part(rng)
    };

    let severity = roll_severity(body_part, rng);
    ShotResult::Hit(HitDetail {
        body_part,
        severity,
        damage: damage_for_severity(severity, weapon_damage),
    })
}

/// Ticks a projectile takes to cover the distance
pub fn impact_delay(distance_feet: f64, velocity_feet_per_second: f64) -> Tick {
    if velocity_feet_per_second <= 0.0 {
        return 0;
    }
    (distance_feet / velocity_feet_per_second * TICKS_PER_SECOND).round() as Tick
}

/// Weighted location table for marginal hits
fn random_body_part<R: Rng>(rng: &mut R) -> BodyPart {
    let roll = rng.gen_range(0..100);
    match roll {
        0..=11 => BodyPart::LeftArm,
        12..=23 => BodyPart::RightArm,
        24..=31 => BodyPart::LeftShoulder,
        32..=39 => BodyPart::RightShoulder,
        40..=49 => BodyPart::Head,
        50..=54 => BodyPart::LeftLeg,
        _ => BodyPart::RightLeg,
    }
}

/// Severity is a fresh roll; vital parts skew toward worse wounds
fn roll_severity<R: Rng>(body_part: BodyPart, rng: &mut R) -> WoundSeverity {
    let roll = rng.gen::<f64>() * 100.0;
    if body_part.is_vital() {
        match roll {
            r if r < 30.0 => WoundSeverity::Critical,
            r if r < 70.0 => WoundSeverity::Serious,
            r if r < 95.0 => WoundSeverity::Light,
            _ => WoundSeverity::Scratch,
        }
    } else {
        match roll {
            r if r < 10.0 => WoundSeverity::Critical,
            r if r < 35.0 => WoundSeverity::Serious,
            r if r < 80.0 => WoundSeverity::Light,
            _ => WoundSeverity::Scratch,
        }
    }
}

/// Damage dealt by a wound of the given severity
pub fn damage_for_severity(severity: WoundSeverity, weapon_damage: i32) -> i32 {
    match severity {
        WoundSeverity::Critical | WoundSeverity::Serious => weapon_damage,
        WoundSeverity::Light => ((f64::from(weapon_damage) * 0.4).round() as i32).max(1),
        WoundSeverity::Scratch => 1,
    }
}

/// Base chance a stray round finds a bystander near its miss point
const STRAY_BASE_CHANCE: f64 = 15.0;
/// Stray chance lost per foot between the bystander and the miss point
const STRAY_DISTANCE_PENALTY: f64 = 2.0;
/// Stray chance never drops below this for units inside the radius
const STRAY_CHANCE_FLOOR: f64 = 1.0;
/// Stray rounds arrive tumbling and spent: 30% less damage
const STRAY_DAMAGE_FACTOR: f64 = 0.7;

/// Roll whether a missed round clips a bystander near the miss point
///
/// Stray hits land anywhere on the body and skew toward lighter
/// wounds than aimed fire.
pub fn resolve_stray_hit<R: Rng>(
    distance_to_miss_feet: f64,
    weapon_damage: i32,
    rng: &mut R,
) -> Option<HitDetail> {
    let chance = (STRAY_BASE_CHANCE - STRAY_DISTANCE_PENALTY * distance_to_miss_feet)
        .max(STRAY_CHANCE_FLOOR);
    let roll = rng.gen::<f64>() * 100.0;
    if roll >= chance {
        return None;
    }

    let body_part = random_body_part(rng);
    let severity = roll_stray_severity(rng);
    let damage = ((f64::from(damage_for_severity(severity, weapon_damage))
        * STRAY_DAMAGE_FACTOR)
        .round() as i32)
        .max(1);
    Some(HitDetail {
        body_part,
        severity,
        damage,
    })
}

/// Stray severity table: 5% critical, 15% serious, 40% light, 40% scratch
fn roll_stray_severity<R: Rng>(rng: &mut R) -> WoundSeverity {
    let roll = rng.gen::<f64>() * 100.0;
    match roll {
        r if r < 5.0 => WoundSeverity::Critical,
        r if r < 20.0 => WoundSeverity::Serious,
        r if r < 60.0 => WoundSeverity::Light,
        _ => WoundSeverity::Scratch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    use crate::core::types::{UnitId, Vec2};
    use crate::entity::character::{Character, Handedness};

    /// StepRng seed whose f64 conversion is exactly 0.5
    const HALF: u64 = 1 << 63;

    fn standing_unit(id: u32, x: f64) -> Unit {
        let character = Character::new("Duelist", 50, 20, 50, 50, 50, Handedness::RightHanded)
            .with_weapon(Weapon::pistol());
        Unit::new(UnitId(id), character, Vec2::new(x, 0.0))
    }

    #[test]
    fn test_chance_for_average_duelists_at_optimal_range() {
        // Optimal pistol range is 45ft = 315px. Everything cancels
        // except base 50 and stress -20.
        let shooter = standing_unit(0, 0.0);
        let target = standing_unit(1, 315.0);
        let config = ScenarioConfig::default();
        let weapon = Weapon::pistol();
        let chance = compute_hit_chance(&shooter, &target, &weapon, &config);
        assert!((chance - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_chance_beyond_max_range_uses_raw_formula() {
        let shooter = standing_unit(0, 0.0);
        // 151ft, just past the pistol's 150ft maximum: the range
        // penalty keeps ramping but the shot is not written off
        let target = standing_unit(1, 151.0 * 7.0);
        let config = ScenarioConfig::default();
        let weapon = Weapon::pistol();
        let chance = compute_hit_chance(&shooter, &target, &weapon, &config);
        let expected = 30.0 - 20.0 * (151.0 - 45.0) / 105.0;
        assert!((chance - expected).abs() < 1e-9);
        assert!(chance > 0.0);
    }

    #[test]
    fn test_chance_floor_does_not_apply_beyond_max_range() {
        // Wound the shooter badly enough to drive the sum negative
        let mut shooter = standing_unit(0, 0.0);
        for _ in 0..10 {
            shooter.character.wounds.push(crate::combat::wounds::Wound::new(
                BodyPart::Head,
                WoundSeverity::Critical,
                8,
                "Pistol",
                "bullet",
            ));
        }
        let config = ScenarioConfig::default();
        let weapon = Weapon::pistol();

        // Within range the floor holds the chance up
        let target = standing_unit(1, 149.0 * 7.0);
        let chance = compute_hit_chance(&shooter, &target, &weapon, &config);
        assert_eq!(chance, config.minimum_hit_chance);

        // Beyond range the raw negative chance comes through
        let far_target = standing_unit(2, 151.0 * 7.0);
        let chance = compute_hit_chance(&shooter, &far_target, &weapon, &config);
        assert!(chance < 0.0);
    }

    #[test]
    fn test_low_roll_is_excellent_chest_critical() {
        let mut rng = StepRng::new(0, 0);
        let result = resolve_shot(80.0, 7, &mut rng);
        assert_eq!(
            result,
            ShotResult::Hit(HitDetail {
                body_part: BodyPart::Chest,
                severity: WoundSeverity::Critical,
                damage: 7,
            })
        );
    }

    #[test]
    fn test_high_roll_misses() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(resolve_shot(80.0, 7, &mut rng), ShotResult::Miss);
    }

    #[test]
    fn test_zero_chance_never_hits() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(resolve_shot(0.0, 7, &mut rng), ShotResult::Miss);
    }

    #[test]
    fn test_mid_roll_lands_in_good_band() {
        // Roll 50 against chance 80: past excellent (16), inside good (56).
        // The follow-up rolls are also 0.5, picking abdomen and a
        // serious wound on a vital part.
        let mut rng = StepRng::new(HALF, 0);
        let result = resolve_shot(80.0, 7, &mut rng);
        assert_eq!(
            result,
            ShotResult::Hit(HitDetail {
                body_part: BodyPart::Abdomen,
                severity: WoundSeverity::Serious,
                damage: 7,
            })
        );
    }

    #[test]
    fn test_damage_scaling() {
        assert_eq!(damage_for_severity(WoundSeverity::Critical, 7), 7);
        assert_eq!(damage_for_severity(WoundSeverity::Serious, 7), 7);
        assert_eq!(damage_for_severity(WoundSeverity::Light, 7), 3);
        assert_eq!(damage_for_severity(WoundSeverity::Light, 1), 1);
        assert_eq!(damage_for_severity(WoundSeverity::Scratch, 12), 1);
    }

    #[test]
    fn test_stray_hit_on_low_roll() {
        // Roll 0 against chance 5 (5ft from the miss point); the
        // follow-up zero rolls pick the first table entries
        let mut rng = StepRng::new(0, 0);
        let detail = resolve_stray_hit(5.0, 7, &mut rng).expect("stray should connect");
        assert_eq!(detail.body_part, BodyPart::LeftArm);
        assert_eq!(detail.severity, WoundSeverity::Critical);
        // Full critical damage 7, reduced 30% and rounded
        assert_eq!(detail.damage, 5);
    }

    #[test]
    fn test_stray_chance_is_floored_not_zeroed() {
        // 20ft from the miss point drives the raw chance negative,
        // but the 1% floor keeps a lucky roll possible
        let mut rng = StepRng::new(0, 0);
        assert!(resolve_stray_hit(20.0, 7, &mut rng).is_some());
    }

    #[test]
    fn test_stray_high_roll_passes_clean() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert!(resolve_stray_hit(0.0, 7, &mut rng).is_none());
    }

    #[test]
    fn test_impact_delay_rounds() {
        // 100ft at 600 ft/s: 10 ticks
        assert_eq!(impact_delay(100.0, 600.0), 10);
        // 45ft at 600 ft/s: 4.5 ticks rounds to 5 (ties away from zero)
        assert_eq!(impact_delay(45.0, 600.0), 5);
        assert_eq!(impact_delay(0.0, 600.0), 0);
    }
}
