//! Presentation plugin - sound, animation state, markers, and meshes.

use bevy::prelude::*;

use super::animation;
use super::audio::{self, SoundCache};
use super::telegraph;
use super::visuals;
use crate::combat::CombatSet;
use crate::core::GameState;

/// Presentation plugin - needs rendering and `bevy_kira_audio::AudioPlugin`.
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundCache>()
            .add_systems(
                Update,
                (
                    animation::attach_animators,
                    visuals::decorate_bosses,
                    visuals::decorate_projectiles,
                    visuals::decorate_player,
                )
                    .run_if(in_state(GameState::InGame)),
            )
            // Signals are raised during combat, so react once combat is done
            .add_systems(
                Update,
                (
                    animation::apply_animation_signals,
                    audio::play_signal_sounds,
                    telegraph::sync_telegraph_markers,
                    telegraph::cleanup_orphan_markers,
                    (visuals::fade_hit_flashes, visuals::start_hit_flashes, visuals::tint_flashing_bosses).chain(),
                )
                    .after(CombatSet::Cleanup)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
