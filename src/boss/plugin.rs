//! Boss plugin - registers all boss systems.

use bevy::prelude::*;

use super::components::*;
use super::data::{load_boss_definitions, BossRegistry};
use super::projectile;
use super::spawning::spawn_pending_bosses;
use super::systems;
use crate::combat::CombatSet;

/// Boss plugin - handles boss data, spawning, encounters, and projectiles.
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BossRegistry>()
            .add_event::<BossEncounterEvent>()
            .add_event::<PresentationEvent>()
            .add_event::<EncounterCommand>()
            // Definitions are needed before anything can spawn
            .add_systems(Startup, load_boss_definitions)
            .add_systems(
                Update,
                (spawn_pending_bosses, systems::apply_encounter_commands)
                    .chain()
                    .in_set(CombatSet::Input),
            )
            .add_systems(
                Update,
                (
                    systems::drive_encounters,
                    projectile::move_projectiles,
                    projectile::projectile_contacts,
                )
                    .chain()
                    .in_set(CombatSet::Action),
            )
            .add_systems(Update, systems::route_boss_damage.in_set(CombatSet::Damage))
            .add_systems(Update, systems::handle_deactivation.in_set(CombatSet::Cleanup));
    }
}
