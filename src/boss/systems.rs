//! Systems driving boss encounters from the game loop.
//!
//! The encounter core only knows the collaborator traits in
//! [`host`](super::host). [`EcsHost`] implements them over ECS queries and
//! the physics world for one boss during one system run, buffering
//! everything it cannot do in place (projectiles, events) until the system
//! flushes it.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::encounter::{BossEncounter, EncounterEvent};
use super::host::{DamageableWorld, Presentation, PresentationSignal, ProjectileSpawn, ProjectileSpawner, SpatialQuery};
use super::projectile::spawn_projectile;
use crate::combat::{apply_hit, Damageable, Dead, DamageEvent, DeathEvent, Health, HealthChanged, Invincibility};

/// Damageable entities a boss can read and hurt.
pub type TargetQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static mut Health,
        Option<&'static mut Invincibility>,
    ),
    (With<Damageable>, Without<Boss>),
>;

/// Collaborators for one boss, backed by the ECS.
pub struct EcsHost<'a, 'w, 's> {
    pub boss: Entity,
    pub targets: &'a mut TargetQuery<'w, 's>,
    pub physics: Option<&'a RapierContext>,
    pub signals: Vec<PresentationSignal>,
    pub projectiles: Vec<ProjectileSpawn>,
    pub health_changes: Vec<HealthChanged>,
    pub deaths: Vec<DeathEvent>,
}

impl<'a, 'w, 's> EcsHost<'a, 'w, 's> {
    pub fn new(boss: Entity, targets: &'a mut TargetQuery<'w, 's>, physics: Option<&'a RapierContext>) -> Self {
        Self {
            boss,
            targets,
            physics,
            signals: Vec::new(),
            projectiles: Vec::new(),
            health_changes: Vec::new(),
            deaths: Vec::new(),
        }
    }
}

impl DamageableWorld for EcsHost<'_, '_, '_> {
    fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.targets
            .get(entity)
            .ok()
            .map(|(_, transform, _, _)| transform.translation)
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.targets
            .get(entity)
            .is_ok_and(|(_, _, health, _)| health.is_alive())
    }

    fn apply_damage(&mut self, entity: Entity, amount: u32) -> bool {
        let Ok((_, _, mut health, invincibility)) = self.targets.get_mut(entity) else {
            debug!("Boss {:?} tried to damage missing entity {:?}", self.boss, entity);
            return false;
        };

        let Some(outcome) = apply_hit(&mut health, invincibility.map(Mut::into_inner), amount) else {
            return false;
        };

        self.health_changes.push(HealthChanged {
            entity,
            current: outcome.current,
            maximum: health.maximum(),
        });
        if outcome.became_dead {
            self.deaths.push(DeathEvent {
                entity,
                killed_by: Some(self.boss),
            });
        }
        outcome.became_dead
    }
}

impl SpatialQuery for EcsHost<'_, '_, '_> {
    fn find_within_radius(&self, center: Vec3, radius: f32) -> Vec<Entity> {
        let mut found = Vec::new();

        match self.physics {
            Some(context) => {
                context.intersections_with_shape(
                    center,
                    Quat::IDENTITY,
                    &Collider::ball(radius),
                    QueryFilter::default().exclude_collider(self.boss),
                    |entity| {
                        // Only damage damageables, and each one once
                        if self.targets.contains(entity) && !found.contains(&entity) {
                            found.push(entity);
                        }
                        true // Continue checking other entities
                    },
                );
            }
            None => {
                for (entity, transform, _, _) in self.targets.iter() {
                    if transform.translation.distance(center) <= radius {
                        found.push(entity);
                    }
                }
            }
        }

        found
    }
}

impl ProjectileSpawner for EcsHost<'_, '_, '_> {
    fn spawn_projectile(&mut self, projectile: ProjectileSpawn) {
        self.projectiles.push(projectile);
    }
}

impl Presentation for EcsHost<'_, '_, '_> {
    fn present(&mut self, signal: PresentationSignal) {
        self.signals.push(signal);
    }
}

/// Everything encounter systems write to the world.
#[derive(SystemParam)]
pub struct EncounterOutputs<'w, 's> {
    commands: Commands<'w, 's>,
    encounter_events: EventWriter<'w, BossEncounterEvent>,
    presentation_events: EventWriter<'w, PresentationEvent>,
    health_events: EventWriter<'w, HealthChanged>,
    death_events: EventWriter<'w, DeathEvent>,
}

impl EncounterOutputs<'_, '_> {
    fn present_all(&mut self, boss: Entity, signals: Vec<PresentationSignal>) {
        self.presentation_events
            .send_batch(signals.into_iter().map(|signal| PresentationEvent { boss, signal }));
    }

    /// Carry out what the host buffered during a tick.
    fn flush_host(&mut self, host: EcsHost) {
        let EcsHost {
            boss,
            signals,
            projectiles,
            health_changes,
            deaths,
            ..
        } = host;

        self.present_all(boss, signals);

        for projectile in &projectiles {
            spawn_projectile(&mut self.commands, boss, projectile);
        }

        self.health_events.send_batch(health_changes);

        for death in deaths {
            self.commands.entity(death.entity).insert(Dead);
            self.death_events.send(death);
        }
    }

    /// Re-send the encounter's lifecycle events into the ECS.
    fn flush_encounter(&mut self, boss: Entity, encounter: &mut BossEncounter, killed_by: Option<Entity>) {
        for event in encounter.drain_events() {
            if event == EncounterEvent::Died {
                self.death_events.send(DeathEvent { entity: boss, killed_by });
            }
            self.encounter_events.send(BossEncounterEvent { boss, event });
        }
    }
}

/// Advance every encounter by the frame time.
pub fn drive_encounters(
    time: Res<Time>,
    mut bosses: Query<(Entity, &mut BossEncounter, &mut Transform), With<Boss>>,
    mut targets: TargetQuery,
    rapier_context: Query<&RapierContext>,
    mut outputs: EncounterOutputs,
) {
    let dt = time.delta_secs();
    let physics = rapier_context.get_single().ok();

    for (entity, mut encounter, mut transform) in bosses.iter_mut() {
        let mut host = EcsHost::new(entity, &mut targets, physics);
        encounter.tick(dt, &mut host);
        outputs.flush_host(host);

        // The encounter owns the boss pose
        transform.set_if_neq(*encounter.transform());
        outputs.flush_encounter(entity, &mut encounter, None);
    }
}

/// Route damage aimed at a boss through its encounter.
pub fn route_boss_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut bosses: Query<&mut BossEncounter, With<Boss>>,
    mut outputs: EncounterOutputs,
) {
    for event in damage_events.read() {
        let Ok(mut encounter) = bosses.get_mut(event.target) else {
            continue;
        };

        let mut signals = Vec::new();
        if !encounter.take_hit(event.amount, &mut signals) {
            debug!("{} ignored a hit from {:?}", encounter.name(), event.source);
        }

        outputs.present_all(event.target, signals);
        outputs.flush_encounter(event.target, &mut encounter, Some(event.source));
    }
}

/// Apply [`EncounterCommand`]s.
pub fn apply_encounter_commands(
    mut commands: Commands,
    mut requests: EventReader<EncounterCommand>,
    mut bosses: Query<(&mut BossEncounter, &mut Transform, &mut Visibility), With<Boss>>,
    mut outputs: EncounterOutputs,
) {
    for request in requests.read() {
        let boss = request.boss();
        let Ok((mut encounter, mut transform, mut visibility)) = bosses.get_mut(boss) else {
            warn!("Encounter command for unknown boss {:?}", boss);
            continue;
        };

        let mut signals = Vec::new();
        match request {
            EncounterCommand::ForceStartCombat(_) => encounter.force_start_combat(&mut signals),
            EncounterCommand::Reset(_) => {
                encounter.reset(&mut signals);
                *visibility = Visibility::Inherited;
                commands.entity(boss).remove::<ColliderDisabled>();
            }
        }

        transform.set_if_neq(*encounter.transform());
        outputs.present_all(boss, signals);
        outputs.flush_encounter(boss, &mut encounter, None);
    }
}

/// Hide or despawn bosses whose death animation has finished.
pub fn handle_deactivation(
    mut commands: Commands,
    mut events: EventReader<BossEncounterEvent>,
    mut bosses: Query<(&BossSettings, &mut Visibility), With<Boss>>,
) {
    for event in events.read() {
        if event.event != EncounterEvent::Deactivated {
            continue;
        }

        let Ok((settings, mut visibility)) = bosses.get_mut(event.boss) else {
            continue;
        };

        if settings.destroy_on_death {
            info!("Despawning defeated boss {:?}", event.boss);
            commands.entity(event.boss).despawn_recursive();
        } else {
            *visibility = Visibility::Hidden;
            commands.entity(event.boss).insert(ColliderDisabled);
        }
    }
}
