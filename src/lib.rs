//! Boss Encounter - a data-driven boss fight controller for Bevy.
//!
//! A boss notices the player, delivers an intro, then picks attacks at
//! random among those that are off cooldown and in range: melee swings,
//! projectile fans, and telegraphed jump slams.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, pause toggle
//! - **Combat**: Health, invincibility frames, damage routing
//! - **Boss**: Boss data, encounter state machine, attacks, projectiles
//! - **Presentation**: Sounds, animation triggers, telegraph markers, meshes
//! - **Player**: Movement, melee swing, follow camera
//! - **UI**: HUD, dialogue box, pause menu
//!
//! The encounter logic in [`boss`] is plain Rust advanced by an explicit
//! frame delta, so it can be driven without an `App` at all.

pub mod boss;
pub mod combat;
pub mod core;
pub mod player;
pub mod presentation;
pub mod ui;

use bevy::prelude::*;

/// Gameplay plugins that run without rendering or audio.
///
/// Enough to drive encounters headless.
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Combat systems
            .add_plugins(combat::CombatPlugin)
            // Boss systems
            .add_plugins(boss::BossPlugin);
    }
}

/// Main game plugin that adds all sub-plugins.
pub struct BossEncounterGamePlugin;

impl Plugin for BossEncounterGamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EncounterPlugin)
            // Player systems
            .add_plugins(player::PlayerPlugin)
            // Sound, markers, meshes
            .add_plugins(presentation::PresentationPlugin)
            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
