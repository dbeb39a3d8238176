//! Combat systems - damage handling, invincibility, deaths.

use bevy::prelude::*;

use super::components::*;
use super::health::{DamageOutcome, Health};
use crate::core::GameState;
use crate::player::Player;

/// System set ordering for combat.
///
/// Encounters and projectiles act in `Action`, damage events are resolved in
/// `Damage`, and deaths are cleaned up in `Cleanup`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Action,
    Damage,
    Cleanup,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // System ordering
        .configure_sets(
            Update,
            (
                CombatSet::Input,
                CombatSet::Action,
                CombatSet::Damage,
                CombatSet::Cleanup,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, tick_invincibility.in_set(CombatSet::Input))
        .add_systems(Update, apply_damage.in_set(CombatSet::Damage))
        .add_systems(Update, check_deaths.in_set(CombatSet::Cleanup));
}

/// Run one hit through invincibility frames and health.
///
/// Returns `None` when the hit was ignored (immune or already dead).
pub fn apply_hit(
    health: &mut Health,
    invincibility: Option<&mut Invincibility>,
    amount: u32,
) -> Option<DamageOutcome> {
    if invincibility.as_deref().is_some_and(Invincibility::is_active) {
        return None;
    }

    let outcome = health.apply_damage(amount)?;
    if let Some(frames) = invincibility {
        frames.trigger();
    }
    Some(outcome)
}

fn tick_invincibility(time: Res<Time>, mut query: Query<&mut Invincibility>) {
    for mut frames in query.iter_mut() {
        if frames.is_active() {
            frames.tick(time.delta_secs());
        }
    }
}

/// Apply damage events to entities with a [`Health`] component.
///
/// Bosses keep their health inside the encounter and are handled by the boss
/// systems instead.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&mut Invincibility>), Without<Dead>>,
    mut health_events: EventWriter<HealthChanged>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Track entities that died this frame to avoid duplicate death events
    let mut died_this_frame = std::collections::HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, invincibility)) = health_query.get_mut(event.target) else {
            continue;
        };

        let Some(outcome) = apply_hit(&mut health, invincibility.map(Mut::into_inner), event.amount) else {
            continue;
        };

        health_events.send(HealthChanged {
            entity: event.target,
            current: outcome.current,
            maximum: health.maximum(),
        });

        if outcome.became_dead {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Check for entity deaths.
fn check_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    health_query: Query<Entity, With<Health>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died!");
        } else if health_query.get(event.entity).is_ok() {
            // Plain damageables just disappear; bosses play their death out
            commands.entity(event.entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invincibility_swallows_follow_up_hits() {
        let mut health = Health::new(3);
        let mut frames = Invincibility::new(1.0);

        let first = apply_hit(&mut health, Some(&mut frames), 1);
        assert_eq!(
            first,
            Some(DamageOutcome {
                current: 2,
                became_dead: false
            })
        );
        assert!(apply_hit(&mut health, Some(&mut frames), 1).is_none());
        assert_eq!(health.current(), 2);

        frames.tick(1.0);
        assert!(apply_hit(&mut health, Some(&mut frames), 1).is_some());
        assert_eq!(health.current(), 1);
    }

    #[test]
    fn no_frames_means_every_hit_lands() {
        let mut health = Health::new(3);
        apply_hit(&mut health, None, 1);
        let outcome = apply_hit(&mut health, None, 5);
        assert_eq!(outcome.map(|o| o.became_dead), Some(true));
        assert!(apply_hit(&mut health, None, 1).is_none());
    }
}
