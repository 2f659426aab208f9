//! The simulation clock
//!
//! Ticks only ever move forward; `reset` exists for tearing a scenario
//! down, not for rewinding inside one.

use crate::core::types::Tick;

#[derive(Debug, Clone, Default)]
pub struct GameClock {
    current: Tick,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Tick {
        self.current
    }

    /// Advance by one tick and return the new value
    pub fn advance(&mut self) -> Tick {
        self.current += 1;
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}
