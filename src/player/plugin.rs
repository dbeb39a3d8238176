//! Player plugin - movement, attacking, and camera systems.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles player movement, melee swings, and the camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
