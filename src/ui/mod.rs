//! UI module - HUD, dialogue box, and pause menu.

mod dialogue;
mod hud;
mod plugin;

pub use dialogue::{DialogueBox, DialogueText};
pub use hud::{BossBar, BossBarRoot, HealthBar, HudRoot};
pub use plugin::UiPlugin;
