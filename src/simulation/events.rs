//! Event and signal definitions
//!
//! `CombatEvent` is the internal vocabulary of the scheduler: plain data
//! describing work to do at a tick, interpreted by the tick dispatcher.
//! `CombatSignal` is what the kernel reports outward each tick for the
//! embedding layer (UI, logging, replays) to consume.

use serde::{Deserialize, Serialize};

use crate::combat::body_part::{BodyPart, WoundSeverity};
use crate::combat::resolver::ShotResult;
use crate::core::types::UnitId;
use crate::entity::weapon::Weapon;

/// Why a state-chain walk was started; decides where it stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceGoal {
    /// Walk until the weapon is ready, then stop
    Ready,
    /// Walk until aiming, then schedule the shot
    Attack,
}

/// Which highlight a revert event clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightKind {
    Hit,
    Firing,
}

/// Internal scheduled work
#[derive(Debug, Clone)]
pub enum CombatEvent {
    /// Complete the current weapon state transition and keep walking
    StateAdvance { unit: UnitId, goal: AdvanceGoal },
    /// Pull the trigger on the current target
    Fire { unit: UnitId },
    /// Finish the firing state and start recovering
    Recover { unit: UnitId },
    /// Return from recovery to aiming; continues queued shots
    Reaim { unit: UnitId },
    /// A projectile arrives, carrying its precomputed result and the
    /// weapon that fired it (for wound attribution and stray rounds)
    Impact {
        shooter: UnitId,
        target: UnitId,
        result: ShotResult,
        weapon: Weapon,
    },
    /// Clear a visual highlight
    HighlightRevert { unit: UnitId, kind: HighlightKind },
}

/// Outward-facing notification produced while running a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatSignal {
    WeaponStateChanged { unit: UnitId, state: String },
    Fired { shooter: UnitId, target: UnitId },
    NoAmmunition { unit: UnitId },
    Hit {
        shooter: UnitId,
        target: UnitId,
        body_part: BodyPart,
        severity: WoundSeverity,
        damage: i32,
    },
    Missed { shooter: UnitId, target: UnitId },
    /// A missed round found someone else near its impact point
    StrayHit {
        shooter: UnitId,
        target: UnitId,
        body_part: BodyPart,
        severity: WoundSeverity,
        damage: i32,
    },
    Incapacitated { unit: UnitId },
    HighlightCleared { unit: UnitId, kind: HighlightKind },
}
