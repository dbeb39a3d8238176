//! Boss-related components and events.

use bevy::prelude::*;

use super::encounter::EncounterEvent;
use super::host::PresentationSignal;

/// Marker component for all bosses.
#[derive(Component)]
pub struct Boss;

/// Boss type identifier (matches RON file name).
#[derive(Component, Clone, Debug)]
pub struct BossType(pub String);

/// Per-boss settings that live outside the encounter core.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct BossSettings {
    /// Despawn after the death animation instead of hiding.
    pub destroy_on_death: bool,
}

/// Place one of these in the world to have a boss spawned there once the
/// player exists.
#[derive(Component, Clone, Debug)]
pub struct BossSpawnPoint {
    pub boss_type: String,
}

/// A boss lifecycle notification, tagged with the boss it came from.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BossEncounterEvent {
    pub boss: Entity,
    pub event: EncounterEvent,
}

/// A presentation signal, tagged with the boss that raised it.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PresentationEvent {
    pub boss: Entity,
    pub signal: PresentationSignal,
}

/// External control over an encounter.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterCommand {
    /// Skip the remaining intro dialogue and fight.
    ForceStartCombat(Entity),
    /// Restore the boss to its pre-fight condition.
    Reset(Entity),
}

impl EncounterCommand {
    pub fn boss(&self) -> Entity {
        match self {
            Self::ForceStartCombat(boss) | Self::Reset(boss) => *boss,
        }
    }
}
