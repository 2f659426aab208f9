pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::ScenarioConfig;
pub use error::{FirelineError, Result};
pub use types::{OwnerId, Tick, UnitId, Vec2};
