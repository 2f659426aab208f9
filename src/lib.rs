pub mod combat;
pub mod core;
pub mod entity;
pub mod simulation;
