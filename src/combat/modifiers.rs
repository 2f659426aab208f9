//! Hit chance modifiers
//!
//! Everything that pushes a shot's chance up or down lives here: the
//! stat lookup table and the situational terms (stress, range, movement,
//! wounds, skills). All terms are pure functions so the resolver can sum
//! them and tests can pin each one in isolation.

use crate::combat::wounds::Wound;
use crate::core::constants::pixels_per_tick_to_feet_per_second;
use crate::entity::character::{Character, Handedness, MovementType};
use crate::entity::weapon::WeaponType;

/// Modifier for each stat value 1..=100
///
/// Anchored at -20 / 0 / +20 for stats of 1 / 50 / 100, antisymmetric
/// around the midpoint, with a wide flat band of zeros around average.
#[rustfmt::skip]
const STAT_MODIFIERS: [i32; 100] = [
    -20, -19, -18, -17, -16, -15, -14, -14, -13, -13, // 1-10
    -12, -12, -11, -11, -10, -10,  -9,  -9,  -8,  -8, // 11-20
     -7,  -7,  -6,  -6,  -5,  -5,  -5,  -4,  -4,  -4, // 21-30
     -3,  -3,  -3,  -3,  -2,  -2,  -2,  -2,  -2,  -1, // 31-40
     -1,  -1,  -1,  -1,  -1,   0,   0,   0,   0,   0, // 41-50
      0,   0,   0,   0,   0,   1,   1,   1,   1,   1, // 51-60
      1,   2,   2,   2,   2,   2,   3,   3,   3,   3, // 61-70
      4,   4,   4,   5,   5,   5,   6,   6,   7,   7, // 71-80
      8,   8,   9,   9,  10,  10,  11,  11,  12,  12, // 81-90
     13,  13,  14,  14,  15,  16,  17,  18,  19,  20, // 91-100
];

/// Look up the modifier for a stat, clamping out-of-range values
pub fn stat_modifier(stat: i32) -> i32 {
    let stat = stat.clamp(1, 100);
    STAT_MODIFIERS[(stat - 1) as usize]
}

/// Stress penalty offset by coolness, never a bonus
pub fn stress_modifier(coolness: i32, base_penalty: f64) -> f64 {
    (base_penalty + f64::from(stat_modifier(coolness))).min(0.0)
}

/// Range term: bonus inside optimal range, growing penalty beyond it
///
/// Optimal range is 30% of maximum. At point blank the bonus is +10,
/// fading to 0 at optimal; from there the penalty ramps linearly to
/// -20 at maximum range.
pub fn range_modifier(distance_feet: f64, max_range_feet: f64) -> f64 {
    if max_range_feet <= 0.0 {
        return 0.0;
    }
    let optimal = max_range_feet * 0.3;
    if distance_feet <= optimal {
        10.0 * (1.0 - distance_feet / optimal)
    } else {
        -20.0 * (distance_feet - optimal) / (max_range_feet - optimal)
    }
}

/// Shooter movement penalty; zero while standing still
pub fn movement_modifier(moving: bool, gait: MovementType) -> f64 {
    if moving {
        gait.accuracy_modifier()
    } else {
        0.0
    }
}

/// Penalty for tracking a laterally moving target
///
/// Two points of chance per foot-per-second of perpendicular speed.
pub fn target_movement_modifier(perpendicular_px_per_tick: f64) -> f64 {
    -2.0 * pixels_per_tick_to_feet_per_second(perpendicular_px_per_tick)
}

/// Accumulated penalty from the shooter's own wounds
///
/// Wounds to the head or the shooting arm cost their full damage
/// estimate; wounds elsewhere cost a token amount by severity.
pub fn wound_modifier(wounds: &[Wound], handedness: Handedness) -> f64 {
    use crate::combat::body_part::{BodyPart, WoundSeverity};

    let shooting_arm = handedness.shooting_arm();
    let mut total = 0.0;
    for wound in wounds {
        let penalty = if wound.body_part == BodyPart::Head || wound.body_part == shooting_arm {
            wound.severity.damage_estimate()
        } else {
            match wound.severity {
                WoundSeverity::Scratch => 0,
                WoundSeverity::Light => 1,
                WoundSeverity::Serious => 2,
                WoundSeverity::Critical => wound.severity.damage_estimate(),
            }
        };
        total -= f64::from(penalty);
    }
    total
}

/// Skill bonus with the weapon in hand: five points per level
///
/// Only pistol and rifle skills apply; improvised weapons get nothing.
pub fn skill_modifier(character: &Character, weapon_type: WeaponType) -> f64 {
    match weapon_type.skill_name() {
        Some(skill) => f64::from(character.skill_level(skill)) * 5.0,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::body_part::{BodyPart, WoundSeverity};

    #[test]
    fn test_stat_modifier_anchors() {
        assert_eq!(stat_modifier(1), -20);
        assert_eq!(stat_modifier(50), 0);
        assert_eq!(stat_modifier(51), 0);
        assert_eq!(stat_modifier(100), 20);
    }

    #[test]
    fn test_stat_modifier_clamps() {
        assert_eq!(stat_modifier(-10), -20);
        assert_eq!(stat_modifier(0), -20);
        assert_eq!(stat_modifier(999), 20);
    }

    #[test]
    fn test_stat_modifier_antisymmetric() {
        for i in 1..=49 {
            assert_eq!(
                stat_modifier(51 + i),
                -stat_modifier(50 - i),
                "mirror broken at {}",
                i
            );
        }
    }

    #[test]
    fn test_stat_modifier_monotonic() {
        for stat in 1..100 {
            assert!(stat_modifier(stat) <= stat_modifier(stat + 1));
        }
    }

    #[test]
    fn test_stress_capped_at_zero() {
        // Coolness 100 gives +20, exactly cancelling the penalty
        assert_eq!(stress_modifier(100, -20.0), 0.0);
        // Average coolness leaves the full penalty
        assert_eq!(stress_modifier(50, -20.0), -20.0);
        // Poor coolness makes it worse
        assert_eq!(stress_modifier(1, -20.0), -40.0);
    }

    #[test]
    fn test_range_modifier_endpoints() {
        // Point blank with a 100ft weapon: +10
        assert!((range_modifier(0.0, 100.0) - 10.0).abs() < 1e-9);
        // At optimal (30ft): 0
        assert!(range_modifier(30.0, 100.0).abs() < 1e-9);
        // At maximum: -20
        assert!((range_modifier(100.0, 100.0) + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_modifier_midpoints() {
        // Halfway to optimal: +5
        assert!((range_modifier(15.0, 100.0) - 5.0).abs() < 1e-9);
        // Halfway from optimal to max: -10
        assert!((range_modifier(65.0, 100.0) + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_movement_modifier_stationary_is_zero() {
        assert_eq!(movement_modifier(false, MovementType::Run), 0.0);
        assert_eq!(movement_modifier(true, MovementType::Run), -25.0);
        assert_eq!(movement_modifier(true, MovementType::Walk), -5.0);
    }

    #[test]
    fn test_target_movement_modifier() {
        // 7 px/tick perpendicular = 60 ft/s = -120
        assert!((target_movement_modifier(7.0) + 120.0).abs() < 1e-9);
        assert_eq!(target_movement_modifier(0.0), 0.0);
    }

    #[test]
    fn test_wound_modifier_shooting_arm() {
        let wounds = vec![Wound::new(
            BodyPart::RightArm,
            WoundSeverity::Serious,
            8,
            "Rifle",
            "rifle bullet",
        )];
        // Right-handed: full estimate (8)
        assert_eq!(wound_modifier(&wounds, Handedness::RightHanded), -8.0);
        // Left-handed: off-arm serious wound costs 2
        assert_eq!(wound_modifier(&wounds, Handedness::LeftHanded), -2.0);
    }

    #[test]
    fn test_wound_modifier_head_always_counts() {
        let wounds = vec![Wound::new(
            BodyPart::Head,
            WoundSeverity::Light,
            3,
            "Pistol",
            "bullet",
        )];
        assert_eq!(wound_modifier(&wounds, Handedness::LeftHanded), -3.0);
    }

    #[test]
    fn test_wound_modifier_scratch_elsewhere_free() {
        let wounds = vec![Wound::new(
            BodyPart::LeftLeg,
            WoundSeverity::Scratch,
            1,
            "Pistol",
            "bullet",
        )];
        assert_eq!(wound_modifier(&wounds, Handedness::RightHanded), 0.0);
    }

    #[test]
    fn test_skill_modifier_matches_weapon() {
        let character = Character::new("Shooter", 50, 20, 50, 50, 50, Handedness::RightHanded)
            .with_skill("pistol", 3);
        assert_eq!(skill_modifier(&character, WeaponType::Pistol), 15.0);
        assert_eq!(skill_modifier(&character, WeaponType::Rifle), 0.0);
        assert_eq!(skill_modifier(&character, WeaponType::Other), 0.0);
    }
}
