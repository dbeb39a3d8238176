//! Player module - player entity, movement, melee swing, and follow camera.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::{spawn_player, spawn_player_camera, PlayerCamera};
pub use plugin::PlayerPlugin;
