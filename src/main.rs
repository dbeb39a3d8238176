//! Boss Encounter - Demo Arena
//!
//! Walk into the Warden's detection range to start the fight.
//!
//! Controls:
//! - WASD: Move
//! - Space / Left click: Attack
//! - Enter: Skip the intro
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin as KiraAudioPlugin;
use bevy_rapier3d::prelude::*;

use boss_encounter::boss::BossSpawnPoint;
use boss_encounter::player::{spawn_player, spawn_player_camera, PlayerConfig};

const ARENA_SIZE: f32 = 40.0;

fn main() {
    App::new()
        // Bevy default plugins; audio goes through kira instead
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Boss Encounter".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(KiraAudioPlugin)
        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Our game plugin
        .add_plugins(boss_encounter::BossEncounterGamePlugin)
        .add_systems(Startup, setup_arena)
        .run();
}

/// Floor, light, player, and the Warden's spawn point.
fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlayerConfig>,
) {
    let floor_depth = 0.5;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(ARENA_SIZE, floor_depth, ARENA_SIZE))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.23, 0.22))),
        Transform::from_xyz(0.0, -floor_depth / 2.0, 0.0),
        Collider::cuboid(ARENA_SIZE / 2.0, floor_depth / 2.0, ARENA_SIZE / 2.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Capsule center sits 0.9 above the floor
    spawn_player(&mut commands, Vec3::new(0.0, 0.9, 16.0), &config);
    spawn_player_camera(&mut commands, &config);

    commands.spawn((
        BossSpawnPoint {
            boss_type: "warden".to_string(),
        },
        Transform::from_xyz(0.0, 1.8, -8.0),
    ));
}
