//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent, HealthChanged};

/// Marks entities that area attacks and projectiles are allowed to hurt.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Damageable;

/// Short immunity window after taking a hit.
#[derive(Component, Debug, Clone, Copy)]
pub struct Invincibility {
    /// Length of the window opened by each hit
    pub duration: f32,
    remaining: f32,
}

impl Invincibility {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    /// End the window early.
    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

impl Default for Invincibility {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component, Debug)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_opens_on_trigger_and_closes_over_time() {
        let mut frames = Invincibility::new(1.0);
        assert!(!frames.is_active());

        frames.trigger();
        assert!(frames.is_active());

        frames.tick(0.5);
        assert!(frames.is_active());
        frames.tick(0.5);
        assert!(!frames.is_active());
        assert_eq!(frames.remaining(), 0.0);
    }
}
