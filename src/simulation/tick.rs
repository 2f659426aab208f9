//! The per-tick drive loop
//!
//! One call advances the clock, moves units, and drains every event due
//! this tick in (tick, insertion) order. Events scheduled during the
//! drain for the current tick run before the tick ends, so zero-delay
//! hops never slip a frame.

use tracing::trace;

use crate::core::error::Result;
use crate::simulation::events::{CombatEvent, CombatSignal};
use crate::simulation::scheduler::QueuedEvent;
use crate::simulation::state_machine;
use crate::simulation::world::World;

/// Advance the world one tick and report what happened
pub fn run_tick(world: &mut World) -> Result<Vec<CombatSignal>> {
    let now = world.clock.advance();

    for unit in &mut world.units {
        unit.update_movement();
    }

    let mut signals = Vec::new();
    while let Some(queued) = world.scheduler.pop_due(now) {
        trace!(tick = queued.tick, now, "dispatching event");
        dispatch(world, queued, &mut signals)?;
    }
    Ok(signals)
}

fn dispatch(
    world: &mut World,
    queued: QueuedEvent,
    signals: &mut Vec<CombatSignal>,
) -> Result<()> {
    // Handlers compute follow-up ticks from the event's own timestamp,
    // keeping chains exact even when an event drains a tick late.
    let t = queued.tick;
    match queued.event {
        CombatEvent::StateAdvance { unit, goal } => {
            state_machine::handle_state_advance(world, unit, goal, t, signals)
        }
        CombatEvent::Fire { unit } => state_machine::handle_fire(world, unit, t, signals),
        CombatEvent::Recover { unit } => state_machine::handle_recover(world, unit, t, signals),
        CombatEvent::Reaim { unit } => state_machine::handle_reaim(world, unit, t, signals),
        CombatEvent::Impact {
            shooter,
            target,
            result,
            weapon,
        } => state_machine::handle_impact(world, shooter, target, result, weapon, t, signals),
        CombatEvent::HighlightRevert { unit, kind } => {
            state_machine::handle_highlight_revert(world, unit, kind, signals)
        }
    }
}
