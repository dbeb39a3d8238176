//! Boss module - data-driven boss encounters.
//!
//! The encounter itself ([`BossEncounter`]) is plain Rust advanced by an
//! explicit `dt`; the systems in this module drive it from the game loop and
//! give it access to the world through [`EcsHost`].

mod attack;
mod catalog;
mod components;
mod data;
mod dialogue;
mod encounter;
mod error;
mod executor;
mod host;
mod plugin;
mod projectile;
#[cfg(test)]
mod scenarios;
mod selection;
mod spawning;
mod systems;
mod telegraph;

pub use attack::{AttackDefinition, AttackKind, JumpParams, MeleeParams, ProjectileDefinition, RangedParams};
pub use catalog::AttackCatalog;
pub use components::*;
pub use data::{load_boss_definitions, parse_boss_definition, read_boss_definition, BossDefinition, BossRegistry, BOSS_DATA_DIR};
pub use dialogue::{DialogueProgress, DialogueScript, DialogueSequencer};
pub use encounter::{BossEncounter, EncounterConfig, EncounterEvent, EncounterState};
pub use error::BossDataError;
pub use executor::{arc_position, AttackContext, AttackExecution, ExecutionPhase, ExecutionStatus, JUMP_SETTLE_DELAY};
pub use host::{
    DamageableWorld, EncounterHost, Presentation, PresentationSignal, ProjectileSpawn, ProjectileSpawner, SpatialQuery,
};
pub use plugin::BossPlugin;
pub use projectile::{spawn_projectile, Projectile};
pub use selection::{encounter_rng, select_attack, EncounterRng};
pub use spawning::{spawn_boss, spawn_pending_bosses};
pub use systems::{EcsHost, TargetQuery};
pub use telegraph::{Telegraph, TelegraphHandle, TelegraphSlot};
