pub mod character;
pub mod unit;
pub mod weapon;

pub use character::{AimingSpeed, Character, Handedness, MovementType};
pub use unit::Unit;
pub use weapon::{Weapon, WeaponState, WeaponType};
