//! Units: a character placed in the world
//!
//! Movement is resolved per tick at `effective speed / 60` pixels, with a
//! snap when the remaining distance is under a pixel so units settle
//! exactly on their destination.

use serde::{Deserialize, Serialize};

use crate::core::constants::TICKS_PER_SECOND;
use crate::core::types::{UnitId, Vec2};
use crate::entity::character::Character;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub character: Character,
    pub position: Vec2,
    pub move_target: Option<Vec2>,
    /// Set while struck, for the embedding layer to render
    pub hit_highlighted: bool,
    /// Set while firing, for the embedding layer to render
    pub firing_highlighted: bool,
}

impl Unit {
    pub fn new(id: UnitId, character: Character, position: Vec2) -> Self {
        Self {
            id,
            character,
            position,
            move_target: None,
            hit_highlighted: false,
            firing_highlighted: false,
        }
    }

    pub fn set_move_target(&mut self, target: Vec2) {
        if !self.character.is_incapacitated() {
            self.move_target = Some(target);
        }
    }

    pub fn stop(&mut self) {
        self.move_target = None;
    }

    pub fn is_moving(&self) -> bool {
        self.move_target.is_some() && !self.character.is_incapacitated()
    }

    /// Pixels covered per tick at the current gait
    pub fn speed_per_tick(&self) -> f64 {
        self.character.effective_movement_speed() / TICKS_PER_SECOND
    }

    /// Current velocity in pixels per tick
    pub fn velocity_per_tick(&self) -> Vec2 {
        match self.move_target {
            Some(target) if self.is_moving() => {
                let offset = target - self.position;
                if offset.length() < 1.0 {
                    Vec2::default()
                } else {
                    offset.normalize() * self.speed_per_tick()
                }
            }
            _ => Vec2::default(),
        }
    }

    /// Advance one tick toward the move target, if any
    pub fn update_movement(&mut self) {
        let Some(target) = self.move_target else {
            return;
        };
        if self.character.is_incapacitated() {
            return;
        }

        let offset = target - self.position;
        let distance = offset.length();
        if distance < 1.0 {
            self.position = target;
            self.move_target = None;
            return;
        }

        let step = self.speed_per_tick();
        if step >= distance {
            self.position = target;
            self.move_target = None;
        } else {
            self.position = self.position + offset.normalize() * step;
        }
    }

    /// Speed component orthogonal to the line of sight from `observer`,
    /// in pixels per tick
    ///
    /// This is the lateral motion an aiming shooter has to track; motion
    /// straight toward or away from the shooter contributes nothing.
    pub fn perpendicular_speed(&self, observer: Vec2) -> f64 {
        let velocity = self.velocity_per_tick();
        if velocity.length() < 1e-12 {
            return 0.0;
        }
        let line = self.position - observer;
        if line.length() < 1e-12 {
            return velocity.length();
        }
        let along = line.normalize();
        let parallel = along * velocity.dot(&along);
        (velocity - parallel).length()
    }
}
