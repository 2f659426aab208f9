//! Weapons and their readiness state chains
//!
//! A weapon carries its own chain of named states. Each state knows how
//! long it lasts and which state follows it; the chain loops from
//! recovering back to aiming so follow-up shots skip the draw.

use serde::{Deserialize, Serialize};

/// Weapon state names used by the canonical chains
pub mod states {
    pub const HOLSTERED: &str = "holstered";
    pub const DRAWING: &str = "drawing";
    pub const SLUNG: &str = "slung";
    pub const UNSLING: &str = "unsling";
    pub const READY: &str = "ready";
    pub const AIMING: &str = "aiming";
    pub const FIRING: &str = "firing";
    pub const RECOVERING: &str = "recovering";
}

/// Weapon class, used for skill matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Pistol,
    Rifle,
    Other,
}

impl WeaponType {
    /// The skill that improves accuracy with this weapon class
    pub fn skill_name(&self) -> Option<&'static str> {
        match self {
            WeaponType::Pistol => Some("pistol"),
            WeaponType::Rifle => Some("rifle"),
            WeaponType::Other => None,
        }
    }
}

/// One state in a weapon's readiness chain
///
/// `ticks` is how long the weapon stays in this state before the
/// transition to `next` completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponState {
    pub name: String,
    pub next: String,
    pub ticks: u32,
}

impl WeaponState {
    pub fn new(name: &str, next: &str, ticks: u32) -> Self {
        Self {
            name: name.into(),
            next: next.into(),
            ticks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: i32,
    /// Flat accuracy modifier added to hit chance
    pub accuracy: i32,
    pub max_range_feet: f64,
    pub velocity_feet_per_second: f64,
    pub ammunition: u32,
    pub weapon_type: WeaponType,
    /// What the weapon fires, recorded on the wounds it causes
    pub projectile_name: String,
    pub states: Vec<WeaponState>,
}

impl Weapon {
    /// Look up a state in the chain by name
    pub fn state(&self, name: &str) -> Option<&WeaponState> {
        self.states.iter().find(|s| s.name == name)
    }

    /// The state a carried weapon starts in
    pub fn initial_state(&self) -> &str {
        self.states
            .first()
            .map(|s| s.name.as_str())
            .unwrap_or(states::READY)
    }

    /// A sidearm: fast to draw, short effective range
    pub fn pistol() -> Self {
        Self {
            name: "Pistol".into(),
            damage: 7,
            accuracy: 0,
            max_range_feet: 150.0,
            velocity_feet_per_second: 600.0,
            ammunition: 6,
            weapon_type: WeaponType::Pistol,
            projectile_name: "bullet".into(),
            states: vec![
                WeaponState::new(states::HOLSTERED, states::DRAWING, 0),
                WeaponState::new(states::DRAWING, states::READY, 30),
                WeaponState::new(states::READY, states::AIMING, 15),
                WeaponState::new(states::AIMING, states::FIRING, 60),
                WeaponState::new(states::FIRING, states::RECOVERING, 5),
                WeaponState::new(states::RECOVERING, states::AIMING, 30),
            ],
        }
    }

    /// A long gun: slow to bring up, hits hard at range
    pub fn rifle() -> Self {
        Self {
            name: "Rifle".into(),
            damage: 12,
            accuracy: 5,
            max_range_feet: 300.0,
            velocity_feet_per_second: 800.0,
            ammunition: 10,
            weapon_type: WeaponType::Rifle,
            projectile_name: "rifle bullet".into(),
            states: vec![
                WeaponState::new(states::SLUNG, states::UNSLING, 0),
                WeaponState::new(states::UNSLING, states::READY, 90),
                WeaponState::new(states::READY, states::AIMING, 15),
                WeaponState::new(states::AIMING, states::FIRING, 60),
                WeaponState::new(states::FIRING, states::RECOVERING, 5),
                WeaponState::new(states::RECOVERING, states::AIMING, 30),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pistol_chain_reaches_firing() {
        let pistol = Weapon::pistol();
        let mut name = pistol.initial_state().to_string();
        let mut hops = 0;
        while name != states::FIRING {
            name = pistol.state(&name).unwrap().next.clone();
            hops += 1;
            assert!(hops < 10, "chain should reach firing");
        }
    }

    #[test]
    fn test_pistol_preparation_takes_105_ticks() {
        // holstered(0) + drawing(30) + ready(15) + aiming(60)
        let pistol = Weapon::pistol();
        let mut total = 0;
        let mut name = pistol.initial_state();
        while name != states::FIRING {
            let state = pistol.state(name).unwrap();
            total += state.ticks;
            name = &state.next;
        }
        assert_eq!(total, 105);
    }

    #[test]
    fn test_recovering_loops_back_to_aiming() {
        let rifle = Weapon::rifle();
        assert_eq!(rifle.state(states::RECOVERING).unwrap().next, states::AIMING);
    }

    #[test]
    fn test_skill_names() {
        assert_eq!(WeaponType::Pistol.skill_name(), Some("pistol"));
        assert_eq!(WeaponType::Rifle.skill_name(), Some("rifle"));
        assert_eq!(WeaponType::Other.skill_name(), None);
    }
}
