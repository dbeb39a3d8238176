//! Sound playback for presentation signals.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};
use std::collections::HashMap;

use crate::boss::{PresentationEvent, PresentationSignal};

/// Loaded clips by asset path, so each clip is requested once.
#[derive(Resource, Default)]
pub struct SoundCache {
    handles: HashMap<String, Handle<AudioSource>>,
}

impl SoundCache {
    pub fn handle(&mut self, path: &str, asset_server: &AssetServer) -> Handle<AudioSource> {
        self.handles
            .entry(path.to_string())
            .or_insert_with(|| asset_server.load(path.to_string()))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

pub fn play_signal_sounds(
    mut events: EventReader<PresentationEvent>,
    mut cache: ResMut<SoundCache>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
) {
    for event in events.read() {
        if let PresentationSignal::PlaySound(path) = &event.signal {
            let handle = cache.handle(path, &asset_server);
            audio.play(handle);
        }
    }
}
