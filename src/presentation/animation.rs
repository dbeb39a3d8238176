//! Animation trigger bookkeeping for bosses.
//!
//! Clip playback is left to whatever model a boss uses; this only records
//! what the encounter asked for so an animation graph can pick it up.

use bevy::prelude::*;

use crate::boss::{Boss, PresentationEvent, PresentationSignal};

/// Latest animation requests for one boss.
#[derive(Component, Debug, Default, Clone)]
pub struct BossAnimator {
    /// Most recent one-shot trigger ("Attack", "Jump", "Die", ...)
    pub last_trigger: Option<String>,
    /// Incremented on every trigger, so repeated triggers are visible
    pub trigger_count: u32,
    pub walking: bool,
}

impl BossAnimator {
    pub fn trigger(&mut self, name: &str) {
        self.last_trigger = Some(name.to_string());
        self.trigger_count = self.trigger_count.wrapping_add(1);
    }
}

/// Give every new boss an animator.
pub fn attach_animators(mut commands: Commands, bosses: Query<Entity, (Added<Boss>, Without<BossAnimator>)>) {
    for entity in bosses.iter() {
        commands.entity(entity).insert(BossAnimator::default());
    }
}

pub fn apply_animation_signals(
    mut events: EventReader<PresentationEvent>,
    mut animators: Query<&mut BossAnimator>,
) {
    for event in events.read() {
        let Ok(mut animator) = animators.get_mut(event.boss) else {
            continue;
        };

        match &event.signal {
            PresentationSignal::PlayAnimation(trigger) => {
                debug!("Boss {:?} animation: {}", event.boss, trigger);
                animator.trigger(trigger);
            }
            PresentationSignal::SetWalking(walking) => animator.walking = *walking,
            _ => {}
        }
    }
}
