//! Boss spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::data::{BossDefinition, BossRegistry};
use super::encounter::BossEncounter;
use super::selection::encounter_rng;
use crate::player::Player;

/// Spawn a boss from its definition, fighting `target`.
pub fn spawn_boss(
    commands: &mut Commands,
    boss_type: &str,
    definition: &BossDefinition,
    transform: Transform,
    target: Entity,
) -> Entity {
    let entity = commands.spawn_empty().id();
    insert_boss(commands, entity, boss_type, definition, transform, target);
    entity
}

fn insert_boss(
    commands: &mut Commands,
    entity: Entity,
    boss_type: &str,
    definition: &BossDefinition,
    transform: Transform,
    target: Entity,
) {
    let encounter = BossEncounter::new(definition.to_config(), target, transform, encounter_rng(definition.rng_seed));

    commands.entity(entity).insert((
        Boss,
        BossType(boss_type.to_string()),
        BossSettings {
            destroy_on_death: definition.destroy_on_death,
        },
        encounter,
        transform,
        Visibility::default(),
        // Kinematic: the encounter moves the boss, physics only sees it
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(1.0, 0.8),
    ));

    info!("Spawned boss '{}' ({})", definition.name, boss_type);
}

/// Turn spawn points into bosses once the player exists.
pub fn spawn_pending_bosses(
    mut commands: Commands,
    registry: Res<BossRegistry>,
    points: Query<(Entity, &BossSpawnPoint, &Transform), Without<Boss>>,
    player_query: Query<Entity, With<Player>>,
) {
    if points.is_empty() {
        return;
    }
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for (entity, point, transform) in points.iter() {
        commands.entity(entity).remove::<BossSpawnPoint>();

        let Some(definition) = registry.get(&point.boss_type) else {
            warn!("Unknown boss type '{}', spawn point ignored", point.boss_type);
            continue;
        };

        insert_boss(&mut commands, entity, &point.boss_type, definition, *transform, player);
    }
}
