//! Player movement, melee swing, and isometric follow camera.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::boss::Boss;
use crate::combat::{CombatSet, Damageable, Dead, DamageEvent, Health, Invincibility};
use crate::core::GameState;

/// Marker component for the camera that follows the player.
#[derive(Component)]
pub struct PlayerCamera;

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>()
        .add_systems(
            Update,
            (player_movement, player_attack)
                .chain()
                .in_set(CombatSet::Input),
        )
        .add_systems(
            Update,
            camera_follow
                .after(player_movement)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Handle WASD movement in world axes.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &mut Transform,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        (With<Player>, Without<Dead>),
    >,
) {
    let Ok((player_entity, mut transform, mut movement_state, mut controller)) = player_query.get_single_mut()
    else {
        return;
    };

    // Player capsule is capsule_y(0.5, 0.4), so bottom is 0.9 units below center
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * 0.85;
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        // Fallback: assume grounded if no physics context
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * time.delta_secs();
    }

    // Build input direction from WASD, rotated for the isometric view
    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += Vec3::new(-1.0, 0.0, -1.0);
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction += Vec3::new(1.0, 0.0, 1.0);
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction += Vec3::new(-1.0, 0.0, 1.0);
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += Vec3::new(1.0, 0.0, -1.0);
    }

    let direction = direction.normalize_or_zero();
    if direction != Vec3::ZERO {
        let look_target = transform.translation + direction;
        transform.look_at(look_target, Vec3::Y);
    }

    let horizontal = direction * config.move_speed * time.delta_secs();
    let vertical = Vec3::new(0.0, movement_state.vertical_velocity * time.delta_secs(), 0.0);

    controller.translation = Some(horizontal + vertical);
}

/// Swing at bosses within reach on Space or left click.
pub fn player_attack(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(Entity, &Transform, &mut PlayerAttack), (With<Player>, Without<Dead>)>,
    boss_query: Query<(Entity, &Transform), With<Boss>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player_entity, transform, mut attack)) = player_query.get_single_mut() else {
        return;
    };

    if !attack.ready() {
        attack.cooldown -= time.delta_secs();
        return;
    }

    if !(keyboard.just_pressed(KeyCode::Space) || mouse.just_pressed(MouseButton::Left)) {
        return;
    }
    attack.cooldown = config.attack_cooldown;

    for (boss_entity, boss_transform) in boss_query.iter() {
        let mut offset = boss_transform.translation - transform.translation;
        offset.y = 0.0;

        if offset.length() <= config.attack_range {
            damage_events.send(DamageEvent {
                target: boss_entity,
                source: player_entity,
                amount: config.attack_damage,
            });
        }
    }
}

/// Keep the camera at a fixed offset from the player.
fn camera_follow(
    config: Res<PlayerConfig>,
    player_query: Query<&Transform, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    let focus = player_transform.translation;
    *camera_transform = Transform::from_translation(focus + config.camera_offset).looking_at(focus, Vec3::Y);
}

/// Spawn the player entity.
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: &PlayerConfig) -> Entity {
    commands
        .spawn((
            Player,
            MovementState::default(),
            PlayerAttack::default(),
            // Combat components
            Health::new(config.max_health),
            Invincibility::new(config.invincibility_duration),
            Damageable,
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id()
}

/// Spawn the isometric camera that follows the player.
pub fn spawn_player_camera(commands: &mut Commands, config: &PlayerConfig) -> Entity {
    commands
        .spawn((
            Camera3d::default(),
            PlayerCamera,
            Transform::from_translation(config.camera_offset).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id()
}
