pub mod clock;
pub mod events;
pub mod scheduler;
pub mod state_machine;
pub mod tick;
pub mod world;

pub use clock::GameClock;
pub use events::{CombatSignal, HighlightKind};
pub use scheduler::EventScheduler;
pub use world::World;
