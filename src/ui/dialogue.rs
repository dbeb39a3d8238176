//! Dialogue box for boss intros.

use bevy::prelude::*;

use crate::boss::{Boss, BossEncounter, EncounterCommand, EncounterState, PresentationEvent, PresentationSignal};
use crate::combat::CombatSet;
use crate::core::GameState;

/// Root of the dialogue box.
#[derive(Component)]
pub struct DialogueBox;

/// Speaker name inside the dialogue box.
#[derive(Component)]
pub struct DialogueSpeaker;

/// Line text inside the dialogue box.
#[derive(Component)]
pub struct DialogueText;

pub fn setup_dialogue_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_dialogue_box)
        .add_systems(
            Update,
            show_dialogue_lines
                .after(CombatSet::Cleanup)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, skip_dialogue_input.in_set(CombatSet::Input));
}

fn spawn_dialogue_box(mut commands: Commands, existing: Query<(), With<DialogueBox>>) {
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(60.0),
                left: Val::Percent(20.0),
                bottom: Val::Px(40.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            Visibility::Hidden,
            DialogueBox,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.75, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
                DialogueSpeaker,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                DialogueText,
            ));
        });
}

fn show_dialogue_lines(
    mut events: EventReader<PresentationEvent>,
    mut box_query: Query<&mut Visibility, With<DialogueBox>>,
    mut speaker_query: Query<&mut Text, (With<DialogueSpeaker>, Without<DialogueText>)>,
    mut text_query: Query<&mut Text, (With<DialogueText>, Without<DialogueSpeaker>)>,
) {
    for event in events.read() {
        match &event.signal {
            PresentationSignal::ShowDialogueLine { speaker, text } => {
                if let Ok(mut visibility) = box_query.get_single_mut() {
                    *visibility = Visibility::Inherited;
                }
                if let Ok(mut label) = speaker_query.get_single_mut() {
                    label.0 = speaker.clone();
                }
                if let Ok(mut line) = text_query.get_single_mut() {
                    line.0 = text.clone();
                }
            }
            PresentationSignal::HideDialogue => {
                if let Ok(mut visibility) = box_query.get_single_mut() {
                    *visibility = Visibility::Hidden;
                }
            }
            _ => {}
        }
    }
}

/// Enter skips the intro of every talking boss.
fn skip_dialogue_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bosses: Query<(Entity, &BossEncounter), With<Boss>>,
    mut requests: EventWriter<EncounterCommand>,
) {
    if !keyboard.just_pressed(KeyCode::Enter) {
        return;
    }

    for (entity, encounter) in bosses.iter() {
        if encounter.state() == EncounterState::Dialogue {
            requests.send(EncounterCommand::ForceStartCombat(entity));
        }
    }
}
