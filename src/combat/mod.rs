//! Combat module - health, invincibility frames, and damage routing.

mod components;
mod health;
mod plugin;
mod systems;

pub use components::*;
pub use health::{DamageOutcome, Health};
pub use plugin::CombatPlugin;
pub use systems::{apply_hit, CombatSet};
