//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. Anything that wants to hurt
//! an entity sends a [`DamageEvent`]; the combat systems decide how the hit is
//! applied (boss hits go through the encounter, everything else through
//! [`Health`](crate::combat::Health) directly).

use bevy::prelude::*;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    pub amount: u32,
}

/// Sent when an entity dies (health reaches 0).
///
/// Sent exactly once per death, for the boss as well as for plain
/// damageable entities.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Sent whenever an entity's health actually changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub maximum: u32,
}
