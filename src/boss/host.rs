//! Capabilities an encounter needs from the surrounding game.
//!
//! The encounter core never touches the ECS directly. Each tick it is handed
//! something implementing [`EncounterHost`]; the game provides an ECS-backed
//! implementation and tests provide recording fakes.

use bevy::prelude::*;

use super::telegraph::TelegraphHandle;

/// Read positions of damageable entities and hurt them.
pub trait DamageableWorld {
    fn position_of(&self, entity: Entity) -> Option<Vec3>;

    fn is_alive(&self, entity: Entity) -> bool;

    /// Route damage through the entity's health model. Returns true if the
    /// hit killed it.
    fn apply_damage(&mut self, entity: Entity, amount: u32) -> bool;
}

/// Area queries over damageable entities.
pub trait SpatialQuery {
    fn find_within_radius(&self, center: Vec3, radius: f32) -> Vec<Entity>;
}

/// Everything needed to put one projectile in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec3,
    /// Unit flight direction.
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
    pub radius: f32,
    pub lifetime: f32,
}

pub trait ProjectileSpawner {
    fn spawn_projectile(&mut self, projectile: ProjectileSpawn);
}

/// Fire-and-forget signals for animation, audio and on-screen feedback.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationSignal {
    PlayAnimation(String),
    PlaySound(String),
    SetWalking(bool),
    /// Tint the boss for `duration` seconds after it takes a hit.
    HitFlash {
        color: Color,
        duration: f32,
    },
    ShowTelegraph {
        handle: TelegraphHandle,
        position: Vec3,
        radius: f32,
        color: Color,
    },
    HideTelegraph(TelegraphHandle),
    ShowDialogueLine {
        speaker: String,
        text: String,
    },
    HideDialogue,
}

pub trait Presentation {
    fn present(&mut self, signal: PresentationSignal);
}

impl Presentation for Vec<PresentationSignal> {
    fn present(&mut self, signal: PresentationSignal) {
        self.push(signal);
    }
}

/// The full set of collaborators an encounter tick uses.
pub trait EncounterHost: DamageableWorld + SpatialQuery + ProjectileSpawner + Presentation {}

impl<T> EncounterHost for T where T: DamageableWorld + SpatialQuery + ProjectileSpawner + Presentation {}

/// Helper for optional clips and triggers.
pub(crate) fn present_sound<P: Presentation + ?Sized>(presentation: &mut P, clip: Option<&str>) {
    if let Some(clip) = clip {
        presentation.present(PresentationSignal::PlaySound(clip.to_string()));
    }
}
