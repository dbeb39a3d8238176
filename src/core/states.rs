//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Every encounter
//! system only runs in `InGame`, so pausing freezes boss clocks, attack
//! timers and projectiles alike.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while boss definitions are read
/// - Enter `InGame` once loading finishes
/// - `Paused` freezes gameplay but keeps the world visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
