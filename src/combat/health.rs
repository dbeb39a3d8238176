//! Health model shared by the boss and every damageable entity.

use bevy::prelude::*;

/// Result of a successful [`Health::apply_damage`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health after the hit.
    pub current: u32,
    /// True only for the hit that brought health to zero.
    pub became_dead: bool,
}

/// Current and maximum health.
///
/// Health only moves through [`apply_damage`](Self::apply_damage) and
/// [`heal`](Self::heal), so `0 <= current <= maximum` always holds. Both return
/// `None` when the call was a no-op (the entity is already dead); a `Some`
/// result means a health-changed notification is due.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
    maximum: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        if max == 0 {
            warn!("Health created with a maximum of 0, using 1 instead");
        }
        let maximum = max.max(1);
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.maximum as f32
    }

    pub fn apply_damage(&mut self, amount: u32) -> Option<DamageOutcome> {
        if self.is_dead() {
            return None;
        }

        self.current = self.current.saturating_sub(amount);
        debug_assert!(self.current <= self.maximum);

        Some(DamageOutcome {
            current: self.current,
            became_dead: self.current == 0,
        })
    }

    pub fn heal(&mut self, amount: u32) -> Option<u32> {
        if self.is_dead() {
            return None;
        }

        self.current = self.current.saturating_add(amount).min(self.maximum);
        Some(self.current)
    }

    /// Restore full health, reviving a dead entity.
    pub fn reset(&mut self) {
        self.current = self.maximum;
    }
}
