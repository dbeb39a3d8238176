//! In-game HUD - player health and boss health display.

use bevy::prelude::*;

use crate::boss::{Boss, BossEncounter};
use crate::combat::Health;
use crate::core::GameState;
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the boss bar container, shown only during a fight.
#[derive(Component)]
pub struct BossBarRoot;

/// Marker for boss bar fill.
#[derive(Component)]
pub struct BossBar;

/// Marker for the boss name label.
#[derive(Component)]
pub struct BossNameText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            (update_health_bar, update_boss_bar).run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI once; it survives pausing.
fn spawn_hud(mut commands: Commands, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    // Player health (bottom-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_bar(parent, "Health", Color::srgb(0.8, 0.2, 0.2), 150.0, HealthBar);
        });

    // Boss bar (top center)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::top(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            HudRoot,
            BossBarRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.75, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                },
                BossNameText,
            ));

            parent
                .spawn((
                    Node {
                        width: Val::Px(400.0),
                        height: Val::Px(14.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.6, 0.05, 0.05)),
                        BossBar,
                    ));
                });
        });
}

/// Helper to spawn a labelled status bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, color: Color, width: f32, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|bar_parent| {
            // Label
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            // Bar background
            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(width),
                        height: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    // Bar fill
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

/// Show the first boss that is fighting, hide the bar otherwise.
fn update_boss_bar(
    boss_query: Query<&BossEncounter, With<Boss>>,
    mut root_query: Query<&mut Visibility, With<BossBarRoot>>,
    mut bar_query: Query<&mut Node, With<BossBar>>,
    mut name_query: Query<&mut Text, With<BossNameText>>,
) {
    let Ok(mut visibility) = root_query.get_single_mut() else {
        return;
    };

    let fighting = boss_query
        .iter()
        .find(|encounter| encounter.is_combat_ready() && !encounter.is_dead());

    let Some(encounter) = fighting else {
        visibility.set_if_neq(Visibility::Hidden);
        return;
    };
    visibility.set_if_neq(Visibility::Inherited);

    if let Ok(mut bar) = bar_query.get_single_mut() {
        bar.width = Val::Percent(encounter.health().percentage() * 100.0);
    }
    if let Ok(mut name) = name_query.get_single_mut() {
        if name.0 != encounter.name() {
            name.0 = encounter.name().to_string();
        }
    }
}
