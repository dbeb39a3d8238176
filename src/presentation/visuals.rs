//! Placeholder meshes for bosses, projectiles, and the player, plus the
//! boss hit flash.

use bevy::prelude::*;

use crate::boss::{Boss, PresentationEvent, PresentationSignal, Projectile};
use crate::player::Player;

/// Resting color of the placeholder boss mesh.
const BOSS_COLOR: Color = Color::srgb(0.45, 0.08, 0.1);

/// A boss showing its hit tint.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitFlashTimer {
    pub color: Color,
    pub remaining: f32,
}

pub fn decorate_bosses(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    bosses: Query<Entity, (Added<Boss>, Without<Mesh3d>)>,
) {
    for entity in bosses.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Capsule3d::new(0.8, 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: BOSS_COLOR,
                perceptual_roughness: 0.8,
                ..default()
            })),
        ));
    }
}

pub fn decorate_projectiles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    projectiles: Query<(Entity, &Projectile), Added<Projectile>>,
) {
    for (entity, projectile) in projectiles.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(projectile.radius))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 0.5, 0.1),
                emissive: LinearRgba::rgb(4.0, 1.5, 0.2),
                ..default()
            })),
        ));
    }
}

pub fn decorate_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    players: Query<Entity, (Added<Player>, Without<Mesh3d>)>,
) {
    for entity in players.iter() {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.3, 0.4, 0.7))),
        ));
    }
}

/// Start (or restart) a flash for every `HitFlash` signal.
pub fn start_hit_flashes(mut commands: Commands, mut events: EventReader<PresentationEvent>) {
    for event in events.read() {
        if let PresentationSignal::HitFlash { color, duration } = event.signal {
            commands.entity(event.boss).try_insert(HitFlashTimer {
                color,
                remaining: duration,
            });
        }
    }
}

pub fn fade_hit_flashes(mut commands: Commands, time: Res<Time>, mut flashes: Query<(Entity, &mut HitFlashTimer)>) {
    for (entity, mut flash) in flashes.iter_mut() {
        flash.remaining -= time.delta_secs();
        if flash.remaining <= 0.0 {
            commands.entity(entity).remove::<HitFlashTimer>();
        }
    }
}

/// Paint boss materials with the flash color, or the resting color once it
/// is over.
pub fn tint_flashing_bosses(
    mut materials: ResMut<Assets<StandardMaterial>>,
    bosses: Query<(&MeshMaterial3d<StandardMaterial>, Option<&HitFlashTimer>), With<Boss>>,
) {
    for (material, flash) in bosses.iter() {
        let wanted = flash.map_or(BOSS_COLOR, |flash| flash.color);
        let current = materials.get(&material.0).map(|m| m.base_color);
        if current.is_some_and(|color| color != wanted) {
            if let Some(asset) = materials.get_mut(&material.0) {
                asset.base_color = wanted;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;

    fn flash_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<PresentationEvent>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
            .add_systems(Update, (fade_hit_flashes, start_hit_flashes).chain());
        app
    }

    #[test]
    fn flash_lasts_its_duration() {
        let mut app = flash_app();
        let boss = app.world_mut().spawn(Boss).id();
        let red = Color::srgb(1.0, 0.0, 0.0);

        app.world_mut().send_event(PresentationEvent {
            boss,
            signal: PresentationSignal::HitFlash {
                color: red,
                duration: 0.1,
            },
        });
        app.update();
        assert_eq!(
            app.world().get::<HitFlashTimer>(boss),
            Some(&HitFlashTimer {
                color: red,
                remaining: 0.1,
            })
        );

        for _ in 0..3 {
            app.update();
        }
        assert!(app.world().get::<HitFlashTimer>(boss).is_none());
    }

    #[test]
    fn flash_for_a_despawned_boss_is_dropped() {
        let mut app = flash_app();
        let boss = app.world_mut().spawn(Boss).id();
        app.world_mut().despawn(boss);

        app.world_mut().send_event(PresentationEvent {
            boss,
            signal: PresentationSignal::HitFlash {
                color: Color::WHITE,
                duration: 0.1,
            },
        });
        app.update();
        assert!(app.world().get::<HitFlashTimer>(boss).is_none());
    }
}
