//! Presentation module - turns encounter signals into sound, markers, and
//! animation state.
//!
//! Encounters never touch audio or meshes themselves; they emit
//! [`PresentationEvent`](crate::boss::PresentationEvent)s and the systems
//! here act on them.

mod animation;
mod audio;
mod plugin;
mod telegraph;
mod visuals;

pub use animation::{apply_animation_signals, BossAnimator};
pub use audio::SoundCache;
pub use plugin::PresentationPlugin;
pub use telegraph::{sync_telegraph_markers, TelegraphMarker};
pub use visuals::HitFlashTimer;
