//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// Melee swing state.
#[derive(Component, Default)]
pub struct PlayerAttack {
    /// Seconds until the next swing is allowed
    pub cooldown: f32,
}

impl PlayerAttack {
    pub fn ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

/// Configuration for the player character.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Gravity acceleration
    pub gravity: f32,
    pub max_health: u32,
    /// Seconds of immunity after each hit taken
    pub invincibility_duration: f32,
    pub attack_damage: u32,
    /// Reach of the melee swing
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Offset of the follow camera from the player
    pub camera_offset: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: 15.0,
            max_health: 3,
            invincibility_duration: 1.0,
            attack_damage: 1,
            attack_range: 2.5,
            attack_cooldown: 0.4,
            camera_offset: Vec3::new(10.0, 12.0, 10.0),
        }
    }
}
