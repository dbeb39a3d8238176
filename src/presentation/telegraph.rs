//! Ground markers for telegraphed attacks.

use bevy::prelude::*;

use crate::boss::{Boss, PresentationEvent, PresentationSignal, TelegraphHandle};

/// Marker height, just enough to sit on top of the floor.
const MARKER_THICKNESS: f32 = 0.05;

/// A visible telegraph, owned by the boss that showed it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelegraphMarker {
    pub boss: Entity,
    pub handle: TelegraphHandle,
}

/// Spawn and despawn markers as telegraphs are shown and hidden.
///
/// Meshes are only attached when render assets exist, so markers also work
/// in headless runs.
pub fn sync_telegraph_markers(
    mut commands: Commands,
    mut events: EventReader<PresentationEvent>,
    markers: Query<(Entity, &TelegraphMarker)>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let mut render_assets = meshes.zip(materials);
    // Markers spawned this run are not visible to the query yet
    let mut spawned: Vec<(TelegraphMarker, Entity)> = Vec::new();

    for event in events.read() {
        match &event.signal {
            PresentationSignal::ShowTelegraph {
                handle,
                position,
                radius,
                color,
            } => {
                let tag = TelegraphMarker {
                    boss: event.boss,
                    handle: *handle,
                };
                let mut marker = commands.spawn((
                    tag,
                    Transform::from_translation(*position + Vec3::Y * (MARKER_THICKNESS / 2.0 + 0.01)),
                    Visibility::default(),
                ));

                if let Some((meshes, materials)) = render_assets.as_mut() {
                    marker.insert((
                        Mesh3d(meshes.add(Cylinder::new(*radius, MARKER_THICKNESS))),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: *color,
                            alpha_mode: AlphaMode::Blend,
                            unlit: true,
                            ..default()
                        })),
                    ));
                }
                spawned.push((tag, marker.id()));
            }
            PresentationSignal::HideTelegraph(handle) => {
                let wanted = TelegraphMarker {
                    boss: event.boss,
                    handle: *handle,
                };
                let existing = markers.iter().map(|(entity, marker)| (*marker, entity));
                let fresh = spawned.iter().copied();

                for (marker, entity) in existing.chain(fresh) {
                    if marker == wanted {
                        commands.entity(entity).despawn_recursive();
                    }
                }
                spawned.retain(|(marker, _)| *marker != wanted);
            }
            _ => {}
        }
    }
}

/// Remove markers whose boss no longer exists.
pub fn cleanup_orphan_markers(
    mut commands: Commands,
    markers: Query<(Entity, &TelegraphMarker)>,
    bosses: Query<(), With<Boss>>,
) {
    for (entity, marker) in markers.iter() {
        if !bosses.contains(marker.boss) {
            commands.entity(entity).despawn_recursive();
        }
    }
}
