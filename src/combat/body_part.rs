//! Body parts for hit location and wound tracking (9 parts)

use serde::{Deserialize, Serialize};

/// Wound severity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WoundSeverity {
    /// Cosmetic only
    Scratch,
    /// Painful but functional
    Light,
    /// Impaired function, bleeding
    Serious,
    /// Disabled
    Critical,
}

impl WoundSeverity {
    /// Typical damage a wound of this severity represents
    ///
    /// Used when estimating how much an existing wound impairs a shooter.
    pub fn damage_estimate(&self) -> i32 {
        match self {
            WoundSeverity::Scratch => 1,
            WoundSeverity::Light => 3,
            WoundSeverity::Serious => 8,
            WoundSeverity::Critical => 8,
        }
    }
}

/// Body parts for hit location (9 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Chest,
    Abdomen,
    LeftShoulder,
    RightShoulder,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    /// Returns all body parts
    pub fn all() -> [BodyPart; 9] {
        [
            BodyPart::Head,
            BodyPart::Chest,
            BodyPart::Abdomen,
            BodyPart::LeftShoulder,
            BodyPart::RightShoulder,
            BodyPart::LeftArm,
            BodyPart::RightArm,
            BodyPart::LeftLeg,
            BodyPart::RightLeg,
        ]
    }

    /// Vital parts take severe wounds more readily
    pub fn is_vital(&self) -> bool {
        matches!(self, BodyPart::Head | BodyPart::Chest | BodyPart::Abdomen)
    }

    /// Is this an arm part?
    pub fn is_arm(&self) -> bool {
        matches!(self, BodyPart::LeftArm | BodyPart::RightArm)
    }
}
