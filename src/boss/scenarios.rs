//! Whole-fight scenarios driven tick by tick against a recording host.

use bevy::prelude::*;
use rand::rngs::mock::StepRng;

use super::attack::{AttackDefinition, AttackKind, JumpParams};
use super::dialogue::DialogueScript;
use super::encounter::{BossEncounter, EncounterConfig, EncounterEvent, EncounterState};
use super::host::{DamageableWorld, Presentation, PresentationSignal, ProjectileSpawn, ProjectileSpawner, SpatialQuery};

const PLAYER: Entity = Entity::PLACEHOLDER;

/// A single player standing somewhere, remembering every hit.
#[derive(Default)]
struct Recorder {
    player: Option<Vec3>,
    player_dead: bool,
    damage_calls: Vec<(Entity, u32)>,
    signals: Vec<PresentationSignal>,
}

impl Recorder {
    fn standing_at(position: Vec3) -> Self {
        Self {
            player: Some(position),
            ..default()
        }
    }
}

impl DamageableWorld for Recorder {
    fn position_of(&self, _entity: Entity) -> Option<Vec3> {
        self.player
    }

    fn is_alive(&self, _entity: Entity) -> bool {
        !self.player_dead
    }

    fn apply_damage(&mut self, entity: Entity, amount: u32) -> bool {
        self.damage_calls.push((entity, amount));
        false
    }
}

impl SpatialQuery for Recorder {
    fn find_within_radius(&self, center: Vec3, radius: f32) -> Vec<Entity> {
        match self.player {
            Some(position) if position.distance(center) <= radius => vec![PLAYER],
            _ => Vec::new(),
        }
    }
}

impl ProjectileSpawner for Recorder {
    fn spawn_projectile(&mut self, _projectile: ProjectileSpawn) {}
}

impl Presentation for Recorder {
    fn present(&mut self, signal: PresentationSignal) {
        self.signals.push(signal);
    }
}

fn boss(config: EncounterConfig) -> BossEncounter {
    BossEncounter::new(config, PLAYER, Transform::default(), Box::new(StepRng::new(0, 0)))
}

fn intro(lines: &[&str], line_delay: f32) -> DialogueScript {
    DialogueScript {
        speaker: "Warden".to_string(),
        lines: lines.iter().map(|line| line.to_string()).collect(),
        line_delay,
        voice_sound: None,
    }
}

fn count(events: &[EncounterEvent], wanted: &EncounterEvent) -> usize {
    events.iter().filter(|event| *event == wanted).count()
}

#[test]
fn ten_hits_kill_a_ten_health_boss() {
    let mut boss = boss(EncounterConfig {
        max_health: 10,
        attacks: vec![AttackDefinition::melee("Swipe", 1, 2.0, 3.0, 2.0)],
        ..default()
    });
    let mut recorder = Recorder::default();

    for hit in 1..=10 {
        assert!(boss.take_hit(1, &mut recorder));
        if hit < 10 {
            assert_ne!(boss.state(), EncounterState::Dead);
        }
    }
    assert_eq!(boss.state(), EncounterState::Dead);

    let events = boss.drain_events();
    let health: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            EncounterEvent::HealthChanged(current) => Some(*current),
            _ => None,
        })
        .collect();
    assert_eq!(health, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(count(&events, &EncounterEvent::Died), 1);
}

#[test]
fn nothing_in_range_means_walking() {
    let mut boss = boss(EncounterConfig {
        attacks: vec![AttackDefinition::melee("Swipe", 1, 2.0, 3.0, 2.0)],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -5.0));

    boss.tick(0.0, &mut recorder);
    boss.tick(0.1, &mut recorder);
    assert_eq!(boss.state(), EncounterState::Walking);
    assert!(!boss.is_attacking());
}

#[test]
fn intro_plays_for_three_lines_then_combat_starts_once() {
    let mut boss = boss(EncounterConfig {
        dialogue: Some(intro(&["One.", "Two.", "Three."], 2.0)),
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -6.0));

    boss.tick(0.0, &mut recorder);
    assert_eq!(boss.state(), EncounterState::Dialogue);
    assert_eq!(boss.current_dialogue_line(), Some("One."));
    let mut events = boss.drain_events();

    for _ in 0..23 {
        boss.tick(0.25, &mut recorder);
        assert_eq!(boss.state(), EncounterState::Dialogue);
        assert!(!boss.is_combat_ready());
    }
    assert_eq!(boss.current_dialogue_line(), Some("Three."));

    // t = 6s
    boss.tick(0.25, &mut recorder);
    assert_eq!(boss.state(), EncounterState::Idle);
    assert!(boss.is_combat_ready());
    events.extend(boss.drain_events());

    assert_eq!(count(&events, &EncounterEvent::DialogueStarted), 1);
    assert_eq!(count(&events, &EncounterEvent::DialogueEnded), 1);
    assert_eq!(count(&events, &EncounterEvent::CombatStarted), 1);
    assert_eq!(recorder.signals.last(), Some(&PresentationSignal::HideDialogue));
}

#[test]
fn hits_during_intro_are_ignored() {
    let mut boss = boss(EncounterConfig {
        dialogue: Some(intro(&["Halt."], 2.0)),
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -6.0));

    boss.tick(0.0, &mut recorder);
    assert!(!boss.take_hit(5, &mut recorder));
    assert_eq!(boss.health().current(), 10);
}

#[test]
fn forcing_combat_cuts_the_intro_short() {
    let mut boss = boss(EncounterConfig {
        dialogue: Some(intro(&["One.", "Two."], 2.0)),
        attacks: vec![AttackDefinition::melee("Swipe", 1, 2.0, 10.0, 2.0)],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -6.0));

    boss.tick(0.0, &mut recorder);
    boss.drain_events();

    boss.force_start_combat(&mut recorder);
    assert_eq!(boss.state(), EncounterState::Idle);
    assert!(boss.is_combat_ready());
    assert!(boss.current_dialogue_line().is_none());
    assert_eq!(
        boss.drain_events(),
        vec![EncounterEvent::DialogueEnded, EncounterEvent::CombatStarted]
    );
    assert_eq!(recorder.signals.last(), Some(&PresentationSignal::HideDialogue));

    boss.tick(0.1, &mut recorder);
    assert_eq!(boss.state(), EncounterState::Attacking);
}

#[test]
fn jump_landing_hits_a_nearby_target_once() {
    let mut boss = boss(EncounterConfig {
        attacks: vec![AttackDefinition::new(
            "Leap",
            AttackKind::Jump(JumpParams {
                jump_height: 5.0,
                jump_duration: 1.0,
                aoe_radius: 4.0,
                telegraph_duration: 0.8,
                telegraph_color: [1.0, 0.0, 0.0, 0.5],
                land_sound: None,
            }),
            3,
            30.0,
            10.0,
        )],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(1.0, 0.0, -3.0));

    boss.tick(0.0, &mut recorder);
    for _ in 0..40 {
        boss.tick(0.1, &mut recorder);
    }

    assert_eq!(recorder.damage_calls, vec![(PLAYER, 3)]);
    assert!(boss.active_telegraph().is_none());
    assert_eq!(boss.transform().translation.y, 0.0);
}

#[test]
fn cooldown_spaces_out_attack_starts() {
    let mut boss = boss(EncounterConfig {
        attacks: vec![AttackDefinition::melee("Swipe", 1, 2.0, 3.0, 2.0)],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -1.5));

    let mut started_at = Vec::new();
    boss.tick(0.0, &mut recorder);
    for _ in 0..70 {
        boss.tick(0.1, &mut recorder);
        for event in boss.drain_events() {
            if matches!(event, EncounterEvent::AttackStarted(_)) {
                started_at.push(boss.clock());
            }
        }
    }

    assert!(started_at.len() >= 3, "attacks started at {started_at:?}");
    for pair in started_at.windows(2) {
        assert!(pair[1] - pair[0] >= 2.0 - 1e-4, "attacks started at {started_at:?}");
    }
}

#[test]
fn only_one_attack_runs_at_a_time() {
    let mut boss = boss(EncounterConfig {
        attacks: vec![
            AttackDefinition::melee("Swipe", 1, 0.0, 3.0, 2.0).with_timing(0.5, 1.5),
            AttackDefinition::melee("Jab", 1, 0.0, 3.0, 2.0).with_timing(0.5, 1.5),
        ],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -1.5));

    boss.tick(0.0, &mut recorder);
    boss.tick(0.1, &mut recorder);
    assert!(boss.is_attacking());
    boss.drain_events();

    // Both attacks are off cooldown, but the first one is still running
    for _ in 0..10 {
        boss.tick(0.1, &mut recorder);
        assert!(boss.is_attacking());
        assert!(boss
            .drain_events()
            .iter()
            .all(|event| !matches!(event, EncounterEvent::AttackStarted(_))));
    }
}

#[test]
fn dead_is_final() {
    let mut boss = boss(EncounterConfig {
        attacks: vec![AttackDefinition::melee("Swipe", 1, 0.0, 3.0, 2.0)],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -1.5));

    boss.take_hit(10, &mut recorder);
    assert!(boss.is_dead());
    let clock = boss.clock();

    for _ in 0..50 {
        boss.tick(0.1, &mut recorder);
    }
    assert!(!boss.take_hit(1, &mut recorder));
    assert_eq!(boss.state(), EncounterState::Dead);
    assert_eq!(boss.clock(), clock);
    assert!(recorder.damage_calls.is_empty());
}

#[test]
fn dead_target_sends_the_boss_idle() {
    let mut boss = boss(EncounterConfig {
        attacks: vec![AttackDefinition::melee("Swipe", 1, 2.0, 3.0, 2.0)],
        ..default()
    });
    let mut recorder = Recorder::standing_at(Vec3::new(0.0, 0.0, -6.0));

    boss.tick(0.0, &mut recorder);
    boss.tick(0.1, &mut recorder);
    assert_eq!(boss.state(), EncounterState::Walking);

    recorder.player_dead = true;
    boss.tick(0.1, &mut recorder);
    assert_eq!(boss.state(), EncounterState::Idle);
}
