use thiserror::Error;

#[derive(Error, Debug)]
pub enum FirelineError {
    #[error("Unit not found: {0:?}")]
    UnitNotFound(crate::core::types::UnitId),

    #[error("Cannot schedule event at tick {tick}, clock is already at {now}")]
    PastTick {
        tick: crate::core::types::Tick,
        now: crate::core::types::Tick,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FirelineError>;
