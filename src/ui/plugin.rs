//! UI plugin - HUD, dialogue, and pause menu.

use bevy::prelude::*;

use super::dialogue;
use super::hud;
use crate::boss::{Boss, EncounterCommand};
use crate::combat::{Dead, Health, Invincibility};
use crate::core::GameState;
use crate::player::Player;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        dialogue::setup_dialogue_systems(app);

        app
            // Pause menu
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(Update, pause_menu_input.run_if(in_state(GameState::Paused)))
            .add_systems(OnExit(GameState::Paused), cleanup_pause_menu);
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// What a pause menu button does.
#[derive(Component, Clone, Copy)]
enum PauseAction {
    Resume,
    /// Reset every boss and heal the player
    RetryEncounter,
    Quit,
}

impl PauseAction {
    fn label(self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::RetryEncounter => "Retry Encounter",
            Self::Quit => "Quit",
        }
    }
}

fn spawn_pause_button(parent: &mut ChildBuilder, action: PauseAction) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            action,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(action.label()),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Overlay with the encounter controls.
fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            for action in [PauseAction::Resume, PauseAction::RetryEncounter, PauseAction::Quit] {
                spawn_pause_button(parent, action);
            }
        });
}

fn pause_menu_input(
    mut commands: Commands,
    mut buttons: Query<(&Interaction, &PauseAction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
    bosses: Query<Entity, With<Boss>>,
    mut players: Query<(Entity, &mut Health, Option<&mut Invincibility>), With<Player>>,
    mut encounter_commands: EventWriter<EncounterCommand>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, action, mut background) in buttons.iter_mut() {
        let color = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVERED,
            Interaction::None => BUTTON_IDLE,
        };
        *background = color.into();

        if *interaction != Interaction::Pressed {
            continue;
        }

        match action {
            PauseAction::Resume => next_state.set(GameState::InGame),
            PauseAction::RetryEncounter => {
                info!("Retrying encounter");
                encounter_commands.send_batch(bosses.iter().map(EncounterCommand::Reset));

                for (entity, mut health, invincibility) in players.iter_mut() {
                    health.reset();
                    if let Some(mut frames) = invincibility {
                        frames.clear();
                    }
                    commands.entity(entity).remove::<Dead>();
                }
                next_state.set(GameState::InGame);
            }
            PauseAction::Quit => {
                exit.send(AppExit::Success);
            }
        }
    }
}

fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
