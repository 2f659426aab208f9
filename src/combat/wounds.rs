//! Wound records carried by characters

use serde::{Deserialize, Serialize};

use crate::combat::body_part::{BodyPart, WoundSeverity};

/// A single wound on a character
///
/// Wounds remember what caused them: the weapon and the projectile
/// name, so after-action reports can attribute every scar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wound {
    pub body_part: BodyPart,
    pub severity: WoundSeverity,
    /// Damage the wound dealt when inflicted
    pub damage: i32,
    /// Name of the weapon that inflicted it
    pub source_weapon: String,
    /// What actually struck, e.g. "bullet" or "bullet (stray)"
    pub projectile_name: String,
}

impl Wound {
    pub fn new(
        body_part: BodyPart,
        severity: WoundSeverity,
        damage: i32,
        source_weapon: &str,
        projectile_name: &str,
    ) -> Self {
        Self {
            body_part,
            severity,
            damage,
            source_weapon: source_weapon.into(),
            projectile_name: projectile_name.into(),
        }
    }
}
