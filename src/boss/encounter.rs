//! The boss encounter state machine.
//!
//! [`BossEncounter`] owns everything one fight needs: health, the attack
//! catalog with cooldowns, the dialogue sequencer, at most one in-flight
//! attack and the boss pose. It advances only when [`BossEncounter::tick`] is
//! called, so a test can drive a whole fight with a fake host and a fixed dt.

use bevy::prelude::*;

use super::attack::AttackDefinition;
use super::catalog::AttackCatalog;
use super::dialogue::{DialogueProgress, DialogueScript, DialogueSequencer};
use super::executor::{AttackContext, AttackExecution, ExecutionStatus};
use super::host::{present_sound, EncounterHost, Presentation, PresentationSignal};
use super::selection::{select_attack, EncounterRng};
use super::telegraph::{Telegraph, TelegraphSlot};
use crate::combat::Health;

/// Horizontal distance below which the boss stops stepping toward its target.
const ARRIVAL_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EncounterState {
    #[default]
    Idle,
    Dialogue,
    Walking,
    Attacking,
    Dead,
}

/// Lifecycle notifications, drained by the caller after each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterEvent {
    HealthChanged(u32),
    Died,
    DialogueStarted,
    DialogueEnded,
    CombatStarted,
    AttackStarted(String),
    /// The death animation has finished playing.
    Deactivated,
}

/// Runtime configuration of one boss.
#[derive(Debug, Clone)]
pub struct EncounterConfig {
    pub name: String,
    pub max_health: u32,
    pub detection_range: f32,
    pub move_speed: f32,
    /// Slerp factor per second used when turning toward the target.
    pub rotation_speed: f32,
    /// `None` skips straight to combat on first detection.
    pub dialogue: Option<DialogueScript>,
    pub hurt_sound: Option<String>,
    /// Zero disables the flash.
    pub hit_flash_duration: f32,
    pub hit_color: Color,
    pub death_sound: Option<String>,
    pub death_animation_duration: f32,
    pub attacks: Vec<AttackDefinition>,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            name: "Boss".to_string(),
            max_health: 10,
            detection_range: 15.0,
            move_speed: 3.0,
            rotation_speed: 5.0,
            dialogue: None,
            hurt_sound: None,
            hit_flash_duration: 0.1,
            hit_color: Color::srgb(1.0, 0.0, 0.0),
            death_sound: None,
            death_animation_duration: 3.0,
            attacks: Vec::new(),
        }
    }
}

#[derive(Component)]
pub struct BossEncounter {
    name: String,
    detection_range: f32,
    move_speed: f32,
    rotation_speed: f32,
    dialogue_script: Option<DialogueScript>,
    hurt_sound: Option<String>,
    hit_flash_duration: f32,
    hit_color: Color,
    death_sound: Option<String>,
    death_animation_duration: f32,

    target: Entity,
    health: Health,
    catalog: AttackCatalog,
    rng: EncounterRng,

    state: EncounterState,
    /// Set on first detection, never cleared until reset.
    engaged: bool,
    combat_ready: bool,
    dialogue: Option<DialogueSequencer>,
    execution: Option<AttackExecution>,
    telegraph: TelegraphSlot,

    transform: Transform,
    ground_y: f32,
    clock: f32,
    /// Seconds left before `Deactivated` fires.
    death_timer: Option<f32>,

    events: Vec<EncounterEvent>,
}

impl BossEncounter {
    /// Set up a fresh encounter. `transform` is where the boss stands; its
    /// height is taken as ground level.
    pub fn new(config: EncounterConfig, target: Entity, transform: Transform, rng: EncounterRng) -> Self {
        let dialogue_script = config.dialogue.filter(DialogueScript::is_playable);

        Self {
            health: Health::new(config.max_health),
            catalog: AttackCatalog::new(config.attacks),
            name: config.name,
            detection_range: config.detection_range,
            move_speed: config.move_speed,
            rotation_speed: config.rotation_speed,
            dialogue_script,
            hurt_sound: config.hurt_sound,
            hit_flash_duration: config.hit_flash_duration.max(0.0),
            hit_color: config.hit_color,
            death_sound: config.death_sound,
            death_animation_duration: config.death_animation_duration.max(0.0),
            target,
            rng,
            state: EncounterState::Idle,
            engaged: false,
            combat_ready: false,
            dialogue: None,
            execution: None,
            telegraph: TelegraphSlot::default(),
            ground_y: transform.translation.y,
            transform,
            clock: 0.0,
            death_timer: None,
            events: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn catalog(&self) -> &AttackCatalog {
        &self.catalog
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn set_target(&mut self, target: Entity) {
        self.target = target;
    }

    /// Seconds of encounter time elapsed. Stops advancing once dead.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_dead(&self) -> bool {
        self.state == EncounterState::Dead
    }

    pub fn is_combat_ready(&self) -> bool {
        self.combat_ready
    }

    pub fn is_attacking(&self) -> bool {
        self.execution.is_some()
    }

    pub fn active_telegraph(&self) -> Option<&Telegraph> {
        self.telegraph.active()
    }

    pub fn current_dialogue_line(&self) -> Option<&str> {
        self.dialogue.as_ref().and_then(DialogueSequencer::current_line)
    }

    pub fn drain_events(&mut self) -> Vec<EncounterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the encounter by `dt` seconds.
    pub fn tick<H: EncounterHost + ?Sized>(&mut self, dt: f32, host: &mut H) {
        if self.state == EncounterState::Dead {
            self.tick_death(dt);
            return;
        }

        self.clock += dt;
        self.telegraph.tick(dt);

        if let Some(mut execution) = self.execution.take() {
            let status = match self.catalog.get(execution.attack()) {
                Some(attack) => {
                    let mut ctx = AttackContext {
                        attack,
                        boss: &mut self.transform,
                        ground_y: self.ground_y,
                        target: self.target,
                        telegraph: &mut self.telegraph,
                        host: &mut *host,
                    };
                    execution.advance(dt, &mut ctx)
                }
                None => ExecutionStatus::Complete,
            };

            match status {
                ExecutionStatus::Running => self.execution = Some(execution),
                ExecutionStatus::Complete => self.set_state(EncounterState::Idle, host),
            }
            return;
        }

        if let Some(sequencer) = self.dialogue.as_mut() {
            if sequencer.advance(dt, host) == DialogueProgress::Finished {
                self.dialogue = None;
                self.combat_ready = true;
                self.set_state(EncounterState::Idle, host);
                self.events.push(EncounterEvent::DialogueEnded);
                self.events.push(EncounterEvent::CombatStarted);
                info!("{} finished talking, combat begins", self.name);
            }
            return;
        }

        let target_position = host.position_of(self.target);

        if !self.engaged {
            if let Some(position) = target_position {
                if self.transform.translation.distance(position) <= self.detection_range {
                    self.engage(host);
                }
            }
            return;
        }

        if !self.combat_ready {
            return;
        }

        match target_position {
            Some(position) => self.decide(dt, position, host),
            None => self.set_state(EncounterState::Idle, host),
        }
    }

    /// Damage the boss. Returns whether the hit was taken.
    ///
    /// Hits are ignored while dead and while the intro dialogue plays.
    pub fn take_hit<P: Presentation + ?Sized>(&mut self, amount: u32, presentation: &mut P) -> bool {
        if matches!(self.state, EncounterState::Dead | EncounterState::Dialogue) {
            return false;
        }

        let Some(outcome) = self.health.apply_damage(amount) else {
            return false;
        };

        info!(
            "{} hit for {}! Health: {}/{}",
            self.name,
            amount,
            outcome.current,
            self.health.maximum()
        );
        self.events.push(EncounterEvent::HealthChanged(outcome.current));
        present_sound(presentation, self.hurt_sound.as_deref());
        if self.hit_flash_duration > 0.0 {
            presentation.present(PresentationSignal::HitFlash {
                color: self.hit_color,
                duration: self.hit_flash_duration,
            });
        }

        if outcome.became_dead {
            self.die(presentation);
        }
        true
    }

    /// Skip whatever is left of the intro and fight right away.
    pub fn force_start_combat<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        if self.is_dead() || self.combat_ready {
            return;
        }

        if let Some(mut sequencer) = self.dialogue.take() {
            sequencer.abort(presentation);
            self.events.push(EncounterEvent::DialogueEnded);
        }

        self.engaged = true;
        self.combat_ready = true;
        self.set_state(EncounterState::Idle, presentation);
        self.events.push(EncounterEvent::CombatStarted);
        info!("{} forced into combat", self.name);
    }

    /// Put the encounter back to its pre-fight condition.
    pub fn reset<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        self.execution = None;
        self.telegraph.clear(presentation);
        if let Some(mut sequencer) = self.dialogue.take() {
            sequencer.abort(presentation);
        }

        self.set_state(EncounterState::Idle, presentation);
        self.health.reset();
        self.catalog.reset_cooldowns();
        self.engaged = false;
        self.combat_ready = false;
        self.death_timer = None;
        self.transform.translation.y = self.ground_y;

        self.events.push(EncounterEvent::HealthChanged(self.health.current()));
        info!("{} encounter reset", self.name);
    }

    fn engage<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        self.engaged = true;

        match self.dialogue_script.clone() {
            Some(script) => {
                info!("{} spotted its target and starts talking", self.name);
                self.set_state(EncounterState::Dialogue, presentation);
                self.events.push(EncounterEvent::DialogueStarted);
                self.dialogue = Some(DialogueSequencer::play(script, presentation));
            }
            None => {
                info!("{} spotted its target, combat begins", self.name);
                self.combat_ready = true;
                self.events.push(EncounterEvent::CombatStarted);
            }
        }
    }

    fn decide<H: EncounterHost + ?Sized>(&mut self, dt: f32, target_position: Vec3, host: &mut H) {
        let distance = self.transform.translation.distance(target_position);

        if distance > self.detection_range || !host.is_alive(self.target) {
            self.set_state(EncounterState::Idle, host);
            return;
        }

        self.face(target_position, dt);

        match select_attack(&self.catalog, distance, self.clock, &mut *self.rng) {
            Some(index) => self.begin_attack(index, host),
            None => {
                self.set_state(EncounterState::Walking, host);
                self.step_toward(target_position, dt);
            }
        }
    }

    fn begin_attack<H: EncounterHost + ?Sized>(&mut self, index: usize, host: &mut H) {
        self.catalog.mark_used(index, self.clock);

        let Some(attack) = self.catalog.get(index) else {
            return;
        };
        let name = attack.name.clone();

        let mut ctx = AttackContext {
            attack,
            boss: &mut self.transform,
            ground_y: self.ground_y,
            target: self.target,
            telegraph: &mut self.telegraph,
            host: &mut *host,
        };
        self.execution = Some(AttackExecution::start(index, &mut ctx));

        self.set_state(EncounterState::Attacking, host);
        debug!("{} uses {}", self.name, name);
        self.events.push(EncounterEvent::AttackStarted(name));
    }

    fn face(&mut self, target_position: Vec3, dt: f32) {
        let look_target = Vec3::new(target_position.x, self.transform.translation.y, target_position.z);
        if look_target.distance_squared(self.transform.translation) <= f32::EPSILON {
            return;
        }

        let wanted = self.transform.looking_at(look_target, Vec3::Y).rotation;
        let t = (self.rotation_speed * dt).clamp(0.0, 1.0);
        self.transform.rotation = self.transform.rotation.slerp(wanted, t);
    }

    fn step_toward(&mut self, target_position: Vec3, dt: f32) {
        let mut to_target = target_position - self.transform.translation;
        to_target.y = 0.0;

        if to_target.length() > ARRIVAL_THRESHOLD {
            self.transform.translation += to_target.normalize() * self.move_speed * dt;
        }
    }

    fn die<P: Presentation + ?Sized>(&mut self, presentation: &mut P) {
        // In-flight attacks are dropped on the spot
        self.execution = None;
        self.telegraph.clear(presentation);
        self.transform.translation.y = self.ground_y;

        self.set_state(EncounterState::Dead, presentation);
        presentation.present(PresentationSignal::PlayAnimation("Die".to_string()));
        present_sound(presentation, self.death_sound.as_deref());
        self.events.push(EncounterEvent::Died);
        self.death_timer = Some(self.death_animation_duration);

        info!("{} has been defeated!", self.name);
    }

    fn tick_death(&mut self, dt: f32) {
        let Some(remaining) = self.death_timer.as_mut() else {
            return;
        };

        *remaining -= dt;
        if *remaining <= 0.0 {
            self.death_timer = None;
            self.events.push(EncounterEvent::Deactivated);
        }
    }

    fn set_state<P: Presentation + ?Sized>(&mut self, next: EncounterState, presentation: &mut P) {
        if self.state == next {
            return;
        }

        let was_walking = self.state == EncounterState::Walking;
        let is_walking = next == EncounterState::Walking;
        if was_walking != is_walking {
            presentation.present(PresentationSignal::SetWalking(is_walking));
        }

        debug!("{}: {:?} -> {:?}", self.name, self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::attack::{AttackKind, JumpParams};
    use crate::boss::host::{DamageableWorld, ProjectileSpawn, ProjectileSpawner, SpatialQuery};
    use rand::rngs::mock::StepRng;

    const PLAYER: Entity = Entity::PLACEHOLDER;

    #[derive(Default)]
    struct Arena {
        player: Option<Vec3>,
        player_hits: u32,
        signals: Vec<PresentationSignal>,
    }

    impl DamageableWorld for Arena {
        fn position_of(&self, _entity: Entity) -> Option<Vec3> {
            self.player
        }

        fn is_alive(&self, _entity: Entity) -> bool {
            true
        }

        fn apply_damage(&mut self, _entity: Entity, amount: u32) -> bool {
            self.player_hits += amount;
            false
        }
    }

    impl SpatialQuery for Arena {
        fn find_within_radius(&self, center: Vec3, radius: f32) -> Vec<Entity> {
            match self.player {
                Some(position) if position.distance(center) <= radius => vec![PLAYER],
                _ => Vec::new(),
            }
        }
    }

    impl ProjectileSpawner for Arena {
        fn spawn_projectile(&mut self, _projectile: ProjectileSpawn) {}
    }

    impl Presentation for Arena {
        fn present(&mut self, signal: PresentationSignal) {
            self.signals.push(signal);
        }
    }

    fn encounter(config: EncounterConfig) -> BossEncounter {
        BossEncounter::new(config, PLAYER, Transform::default(), Box::new(StepRng::new(0, 0)))
    }

    fn leap() -> AttackDefinition {
        AttackDefinition::new(
            "Leap",
            AttackKind::Jump(JumpParams {
                jump_height: 4.0,
                jump_duration: 1.0,
                aoe_radius: 3.0,
                telegraph_duration: 1.0,
                telegraph_color: [1.0, 0.0, 0.0, 0.5],
                land_sound: None,
            }),
            5,
            10.0,
            10.0,
        )
    }

    #[test]
    fn out_of_range_target_does_not_engage() {
        let mut boss = encounter(EncounterConfig::default());
        let mut arena = Arena {
            player: Some(Vec3::new(0.0, 0.0, 50.0)),
            ..default()
        };

        boss.tick(0.5, &mut arena);
        assert_eq!(boss.state(), EncounterState::Idle);
        assert!(!boss.is_combat_ready());
        assert!(boss.drain_events().is_empty());
    }

    #[test]
    fn walking_toggles_the_walking_signal() {
        let mut boss = encounter(EncounterConfig::default());
        let mut arena = Arena {
            player: Some(Vec3::new(0.0, 0.0, -5.0)),
            ..default()
        };

        boss.tick(0.25, &mut arena);
        boss.tick(0.25, &mut arena);
        assert_eq!(boss.state(), EncounterState::Walking);
        assert_eq!(arena.signals, vec![PresentationSignal::SetWalking(true)]);
        assert!(boss.transform().translation.z < 0.0);

        // Target walks off
        arena.player = Some(Vec3::new(0.0, 0.0, -100.0));
        boss.tick(0.25, &mut arena);
        assert_eq!(boss.state(), EncounterState::Idle);
        assert_eq!(arena.signals.last(), Some(&PresentationSignal::SetWalking(false)));
    }

    #[test]
    fn death_mid_jump_cancels_and_grounds_the_boss() {
        let mut boss = encounter(EncounterConfig {
            attacks: vec![leap()],
            ..default()
        });
        let mut arena = Arena {
            player: Some(Vec3::new(0.0, 0.0, -4.0)),
            ..default()
        };

        boss.tick(0.0, &mut arena);
        boss.tick(0.5, &mut arena);
        assert_eq!(boss.state(), EncounterState::Attacking);
        assert!(boss.active_telegraph().is_some());

        // Wait out the telegraph, then get into the air
        boss.tick(1.0, &mut arena);
        boss.tick(0.5, &mut arena);
        assert!(boss.transform().translation.y > 0.0);

        boss.take_hit(100, &mut arena);
        assert_eq!(boss.state(), EncounterState::Dead);
        assert!(boss.active_telegraph().is_none());
        assert!(!boss.is_attacking());
        assert_eq!(boss.transform().translation.y, 0.0);

        for _ in 0..20 {
            boss.tick(0.5, &mut arena);
        }
        assert_eq!(arena.player_hits, 0);
    }

    #[test]
    fn deactivates_once_after_death_animation() {
        let mut boss = encounter(EncounterConfig {
            death_animation_duration: 1.0,
            ..default()
        });
        let mut arena = Arena::default();

        boss.take_hit(10, &mut arena);
        boss.drain_events();

        boss.tick(0.5, &mut arena);
        assert!(boss.drain_events().is_empty());
        boss.tick(0.5, &mut arena);
        assert_eq!(boss.drain_events(), vec![EncounterEvent::Deactivated]);
        boss.tick(0.5, &mut arena);
        assert!(boss.drain_events().is_empty());
    }

    #[test]
    fn hits_play_hurt_sound() {
        let mut boss = encounter(EncounterConfig {
            hurt_sound: Some("hurt.ogg".to_string()),
            ..default()
        });
        let mut arena = Arena::default();

        assert!(boss.take_hit(1, &mut arena));
        assert_eq!(
            arena.signals,
            vec![
                PresentationSignal::PlaySound("hurt.ogg".to_string()),
                PresentationSignal::HitFlash {
                    color: Color::srgb(1.0, 0.0, 0.0),
                    duration: 0.1,
                },
            ]
        );
    }

    #[test]
    fn hit_flash_follows_config() {
        let gold = Color::srgb(1.0, 0.8, 0.0);
        let mut boss = encounter(EncounterConfig {
            hit_flash_duration: 0.25,
            hit_color: gold,
            ..default()
        });
        let mut arena = Arena::default();

        boss.take_hit(1, &mut arena);
        assert_eq!(
            arena.signals,
            vec![PresentationSignal::HitFlash {
                color: gold,
                duration: 0.25,
            }]
        );

        // No flash when disabled, and none for ignored hits
        let mut plain = encounter(EncounterConfig {
            hit_flash_duration: 0.0,
            ..default()
        });
        let mut quiet = Arena::default();
        plain.take_hit(1, &mut quiet);
        assert!(quiet.signals.is_empty());

        boss.take_hit(20, &mut arena);
        arena.signals.clear();
        assert!(!boss.take_hit(1, &mut arena));
        assert!(arena.signals.is_empty());
    }

    #[test]
    fn reset_restores_a_fresh_encounter() {
        let mut boss = encounter(EncounterConfig {
            attacks: vec![leap()],
            ..default()
        });
        let mut arena = Arena {
            player: Some(Vec3::new(0.0, 0.0, -4.0)),
            ..default()
        };

        boss.tick(0.0, &mut arena);
        boss.tick(0.5, &mut arena);
        boss.take_hit(10, &mut arena);
        assert!(boss.is_dead());
        boss.drain_events();

        boss.reset(&mut arena);
        assert_eq!(boss.state(), EncounterState::Idle);
        assert_eq!(boss.health().current(), 10);
        assert!(!boss.is_combat_ready());
        assert_eq!(boss.catalog().last_used_at(0), Some(-10.0));
        assert_eq!(boss.drain_events(), vec![EncounterEvent::HealthChanged(10)]);

        // Fight can start again
        boss.tick(0.0, &mut arena);
        assert!(boss.is_combat_ready());
    }

    #[test]
    fn empty_dialogue_goes_straight_to_combat() {
        let mut boss = encounter(EncounterConfig {
            dialogue: Some(DialogueScript {
                speaker: "Boss".to_string(),
                lines: Vec::new(),
                line_delay: 1.0,
                voice_sound: None,
            }),
            ..default()
        });
        let mut arena = Arena {
            player: Some(Vec3::new(0.0, 0.0, -2.0)),
            ..default()
        };

        boss.tick(0.0, &mut arena);
        assert_eq!(boss.drain_events(), vec![EncounterEvent::CombatStarted]);
        assert_eq!(boss.state(), EncounterState::Idle);
    }
}
