pub mod body_part;
pub mod modifiers;
pub mod resolver;
pub mod wounds;

pub use body_part::{BodyPart, WoundSeverity};
pub use resolver::{HitDetail, ShotResult};
pub use wounds::Wound;
