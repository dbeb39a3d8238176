//! Boss projectiles: straight flight, first contact, lifetime.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::Boss;
use super::host::ProjectileSpawn;
use crate::combat::{DamageEvent, Damageable};

/// Contact radius assumed for damageable bodies when no physics world exists.
const FALLBACK_BODY_RADIUS: f32 = 0.5;

/// A projectile in flight.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub velocity: Vec3,
    pub damage: u32,
    pub radius: f32,
    /// Seconds left before the projectile is removed unspent
    pub remaining_lifetime: f32,
    /// The boss that fired it; never hit by its own shots
    pub source: Entity,
}

/// Spawn a projectile entity. Visuals are attached by the presentation layer.
pub fn spawn_projectile(commands: &mut Commands, source: Entity, spawn: &ProjectileSpawn) -> Entity {
    commands
        .spawn((
            Projectile {
                velocity: spawn.direction.normalize_or_zero() * spawn.speed,
                damage: spawn.damage,
                radius: spawn.radius,
                remaining_lifetime: spawn.lifetime,
                source,
            },
            Transform::from_translation(spawn.position),
            Visibility::default(),
        ))
        .id()
}

/// Move projectiles and expire old ones.
pub fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut Projectile)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut projectile) in query.iter_mut() {
        transform.translation += projectile.velocity * dt;
        projectile.remaining_lifetime -= dt;

        if projectile.remaining_lifetime <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Resolve the first thing each projectile touches.
///
/// Damageable entities take the projectile's damage; any other collider
/// just stops it. Bosses never block or take boss projectiles.
pub fn projectile_contacts(
    mut commands: Commands,
    projectiles: Query<(Entity, &Transform, &Projectile)>,
    damageables: Query<(Entity, &Transform), With<Damageable>>,
    bosses: Query<(), With<Boss>>,
    rapier_context: Query<&RapierContext>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let context = rapier_context.get_single().ok();

    for (entity, transform, projectile) in projectiles.iter() {
        if projectile.remaining_lifetime <= 0.0 {
            continue;
        }

        let contact = match context {
            Some(context) => first_collider_hit(context, transform.translation, projectile, &bosses),
            None => damageables
                .iter()
                .filter(|(candidate, _)| *candidate != projectile.source && !bosses.contains(*candidate))
                .find(|(_, target)| {
                    target.translation.distance(transform.translation) <= projectile.radius + FALLBACK_BODY_RADIUS
                })
                .map(|(candidate, _)| candidate),
        };

        let Some(hit) = contact else {
            continue;
        };

        if damageables.contains(hit) {
            damage_events.send(DamageEvent {
                target: hit,
                source: projectile.source,
                amount: projectile.damage,
            });
        }
        commands.entity(entity).despawn_recursive();
    }
}

fn first_collider_hit(
    context: &RapierContext,
    position: Vec3,
    projectile: &Projectile,
    bosses: &Query<(), With<Boss>>,
) -> Option<Entity> {
    let not_a_boss = |entity: Entity| !bosses.contains(entity);
    let mut hit = None;
    context.intersections_with_shape(
        position,
        Quat::IDENTITY,
        &Collider::ball(projectile.radius),
        QueryFilter::default()
            .exclude_sensors()
            .exclude_collider(projectile.source)
            .predicate(&not_a_boss),
        |entity| {
            hit = Some(entity);
            false // Stop at the first contact
        },
    );
    hit
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::combat::Health;

    fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, crate::EncounterPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app
    }

    fn spawn_damageable(app: &mut App, position: Vec3) -> Entity {
        app.world_mut()
            .spawn((Damageable, Health::new(3), Transform::from_translation(position)))
            .id()
    }

    /// Fire straight down -Z from the origin at 10 units per second.
    fn fire(app: &mut App, source: Entity, lifetime: f32) -> Entity {
        app.world_mut()
            .spawn((
                Projectile {
                    velocity: Vec3::NEG_Z * 10.0,
                    damage: 1,
                    radius: 0.3,
                    remaining_lifetime: lifetime,
                    source,
                },
                Transform::default(),
            ))
            .id()
    }

    fn health(app: &App, entity: Entity) -> u32 {
        app.world().get::<Health>(entity).unwrap().current()
    }

    fn run(app: &mut App, frames: usize) {
        for _ in 0..frames {
            app.update();
        }
    }

    #[test]
    fn first_damageable_in_the_path_takes_one_hit() {
        let mut app = headless_app();
        let source = app.world_mut().spawn(Boss).id();
        let near = spawn_damageable(&mut app, Vec3::new(0.0, 0.0, -3.0));
        let far = spawn_damageable(&mut app, Vec3::new(0.0, 0.0, -6.0));
        let projectile = fire(&mut app, source, 5.0);

        run(&mut app, 12);

        assert_eq!(health(&app, near), 2);
        assert_eq!(health(&app, far), 3);
        assert!(app.world().get::<Projectile>(projectile).is_none());
    }

    #[test]
    fn never_hits_its_own_source() {
        let mut app = headless_app();
        let source = spawn_damageable(&mut app, Vec3::ZERO);
        let target = spawn_damageable(&mut app, Vec3::new(0.0, 0.0, -4.0));
        fire(&mut app, source, 5.0);

        run(&mut app, 10);

        assert_eq!(health(&app, source), 3);
        assert_eq!(health(&app, target), 2);
    }

    #[test]
    fn flies_through_other_bosses() {
        let mut app = headless_app();
        let source = app.world_mut().spawn(Boss).id();
        let other_boss = app
            .world_mut()
            .spawn((Boss, Damageable, Health::new(3), Transform::from_xyz(0.0, 0.0, -2.0)))
            .id();
        let target = spawn_damageable(&mut app, Vec3::new(0.0, 0.0, -4.0));
        fire(&mut app, source, 5.0);

        run(&mut app, 10);

        assert_eq!(health(&app, other_boss), 3);
        assert_eq!(health(&app, target), 2);
    }

    #[test]
    fn expires_after_its_lifetime() {
        let mut app = headless_app();
        let source = app.world_mut().spawn(Boss).id();
        let projectile = fire(&mut app, source, 0.5);

        // Loading takes the first frame or two
        run(&mut app, 4);
        assert!(app.world().get::<Projectile>(projectile).is_some());

        run(&mut app, 6);
        assert!(app.world().get::<Projectile>(projectile).is_none());
    }
}
