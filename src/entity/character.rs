//! Characters: stats, skills, wounds, and weapon handling state
//!
//! Stats run 1..=100 with 50 as the unremarkable average. Derived
//! modifiers come from the fixed lookup table in `combat::modifiers`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::body_part::BodyPart;
use crate::combat::modifiers::stat_modifier;
use crate::combat::wounds::Wound;
use crate::core::types::UnitId;
use crate::entity::weapon::Weapon;

/// Skill name for faster weapon preparation
pub const SKILL_QUICKDRAW: &str = "quickdraw";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    LeftHanded,
    RightHanded,
    Ambidextrous,
}

impl Handedness {
    /// The arm that holds the weapon
    ///
    /// Ambidextrous shooters are treated as right-arm dominant.
    pub fn shooting_arm(&self) -> BodyPart {
        match self {
            Handedness::LeftHanded => BodyPart::LeftArm,
            Handedness::RightHanded | Handedness::Ambidextrous => BodyPart::RightArm,
        }
    }
}

/// Gait while moving; scales speed and penalizes aim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    Crawl,
    Walk,
    Jog,
    Run,
}

impl MovementType {
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            MovementType::Crawl => 0.25,
            MovementType::Walk => 1.0,
            MovementType::Jog => 1.5,
            MovementType::Run => 2.0,
        }
    }

    /// Accuracy penalty while actually moving at this gait
    ///
    /// Crawling is steadier than jogging despite being slower than a walk.
    pub fn accuracy_modifier(&self) -> f64 {
        match self {
            MovementType::Crawl => -10.0,
            MovementType::Walk => -5.0,
            MovementType::Jog => -15.0,
            MovementType::Run => -25.0,
        }
    }
}

/// How deliberately the character aims; trades time for accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimingSpeed {
    Careful,
    Normal,
    Quick,
}

impl AimingSpeed {
    /// Multiplier on the aiming state's duration
    pub fn timing_multiplier(&self) -> f64 {
        match self {
            AimingSpeed::Careful => 2.0,
            AimingSpeed::Normal => 1.0,
            AimingSpeed::Quick => 0.5,
        }
    }

    pub fn accuracy_modifier(&self) -> f64 {
        match self {
            AimingSpeed::Careful => 15.0,
            AimingSpeed::Normal => 0.0,
            AimingSpeed::Quick => -20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub dexterity: i32,
    pub coolness: i32,
    pub strength: i32,
    pub reflexes: i32,
    pub max_health: i32,
    pub health: i32,
    pub handedness: Handedness,
    /// Pixels per second before the gait multiplier
    pub base_movement_speed: f64,
    pub movement_type: MovementType,
    pub aiming_speed: AimingSpeed,
    pub skills: AHashMap<String, i32>,
    pub wounds: Vec<Wound>,
    pub weapon: Option<Weapon>,
    /// Name of the weapon state currently occupied
    pub weapon_state: String,
    pub current_target: Option<UnitId>,
    /// Shots committed but not yet fired; drives automatic fire
    pub queued_shots: u32,
}

impl Character {
    pub fn new(
        name: &str,
        dexterity: i32,
        health: i32,
        coolness: i32,
        strength: i32,
        reflexes: i32,
        handedness: Handedness,
    ) -> Self {
        Self {
            name: name.into(),
            dexterity,
            coolness,
            strength,
            reflexes,
            max_health: health,
            health,
            handedness,
            base_movement_speed: 42.0,
            movement_type: MovementType::Walk,
            aiming_speed: AimingSpeed::Normal,
            skills: AHashMap::new(),
            wounds: Vec::new(),
            weapon: None,
            weapon_state: String::new(),
            current_target: None,
            queued_shots: 0,
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon_state = weapon.initial_state().to_string();
        self.weapon = Some(weapon);
        self
    }

    pub fn with_skill(mut self, skill: &str, level: i32) -> Self {
        self.skills.insert(skill.into(), level);
        self
    }

    pub fn is_incapacitated(&self) -> bool {
        self.health <= 0
    }

    pub fn skill_level(&self, skill: &str) -> i32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Movement speed in pixels per second at the current gait
    pub fn effective_movement_speed(&self) -> f64 {
        self.base_movement_speed * self.movement_type.speed_multiplier()
    }

    /// Multiplier applied to weapon preparation states (draw, ready)
    ///
    /// Fast reflexes and the quickdraw skill both shave time off.
    /// Reflexes of 50 with no skill gives exactly 1.0.
    pub fn ready_speed_multiplier(&self) -> f64 {
        let reflex_factor = 1.0 - f64::from(stat_modifier(self.reflexes)) * 0.015;
        let quickdraw_factor = 1.0 - f64::from(self.skill_level(SKILL_QUICKDRAW)) * 0.08;
        reflex_factor * quickdraw_factor
    }

    pub fn add_wound(&mut self, wound: Wound) {
        self.health -= wound.damage;
        self.wounds.push(wound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn average_character() -> Character {
        Character::new("Test", 50, 20, 50, 50, 50, Handedness::RightHanded)
    }

    #[test]
    fn test_average_reflexes_no_speedup() {
        let character = average_character();
        assert!((character.ready_speed_multiplier() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quickdraw_speeds_preparation() {
        let character = average_character().with_skill(SKILL_QUICKDRAW, 2);
        let multiplier = character.ready_speed_multiplier();
        assert!((multiplier - 0.84).abs() < 1e-9);
    }

    #[test]
    fn test_fast_reflexes_speed_preparation() {
        let mut character = average_character();
        character.reflexes = 100;
        // +20 modifier, 1 - 20 * 0.015 = 0.7
        assert!((character.ready_speed_multiplier() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_incapacitation_threshold() {
        let mut character = average_character();
        assert!(!character.is_incapacitated());
        character.health = 0;
        assert!(character.is_incapacitated());
        character.health = -5;
        assert!(character.is_incapacitated());
    }

    #[test]
    fn test_add_wound_reduces_health() {
        use crate::combat::body_part::{BodyPart, WoundSeverity};
        let mut character = average_character();
        character.add_wound(Wound::new(
            BodyPart::Chest,
            WoundSeverity::Serious,
            7,
            "Pistol",
            "bullet",
        ));
        assert_eq!(character.health, 13);
        assert_eq!(character.wounds.len(), 1);
        assert_eq!(character.wounds[0].source_weapon, "Pistol");
    }

    #[test]
    fn test_shooting_arm_follows_handedness() {
        assert_eq!(Handedness::LeftHanded.shooting_arm(), BodyPart::LeftArm);
        assert_eq!(Handedness::RightHanded.shooting_arm(), BodyPart::RightArm);
        assert_eq!(Handedness::Ambidextrous.shooting_arm(), BodyPart::RightArm);
    }

    #[test]
    fn test_with_weapon_sets_initial_state() {
        let character = average_character().with_weapon(Weapon::pistol());
        assert_eq!(character.weapon_state, "holstered");
    }

    #[test]
    fn test_gait_speeds() {
        let mut character = average_character();
        character.movement_type = MovementType::Run;
        assert!((character.effective_movement_speed() - 84.0).abs() < 1e-9);
        character.movement_type = MovementType::Crawl;
        assert!((character.effective_movement_speed() - 10.5).abs() < 1e-9);
    }
}
