//! Boss data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::attack::AttackDefinition;
use super::dialogue::DialogueScript;
use super::encounter::EncounterConfig;
use super::error::BossDataError;

/// Where boss definitions live, relative to the working directory.
pub const BOSS_DATA_DIR: &str = "assets/data/bosses";

/// Boss definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct BossDefinition {
    pub name: String,
    pub max_health: u32,
    pub detection_range: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    #[serde(default)]
    pub has_intro_dialogue: bool,
    #[serde(default)]
    pub dialogue_lines: Vec<String>,
    #[serde(default = "default_line_delay")]
    pub dialogue_line_delay: f32,
    #[serde(default)]
    pub voice_sound: Option<String>,
    #[serde(default)]
    pub hurt_sound: Option<String>,
    #[serde(default = "default_hit_flash_duration")]
    pub hit_flash_duration: f32,
    /// RGBA tint shown while the hit flash lasts.
    #[serde(default = "default_hit_color")]
    pub hit_color: [f32; 4],
    #[serde(default)]
    pub death_sound: Option<String>,
    #[serde(default = "default_death_animation_duration")]
    pub death_animation_duration: f32,
    /// Despawn the boss after its death animation instead of hiding it.
    #[serde(default)]
    pub destroy_on_death: bool,
    /// Fixed seed for attack selection. Random when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default)]
    pub attacks: Vec<AttackDefinition>,
}

fn default_line_delay() -> f32 {
    2.0
}

fn default_hit_flash_duration() -> f32 {
    0.1
}

fn default_hit_color() -> [f32; 4] {
    [1.0, 0.0, 0.0, 1.0]
}

fn default_death_animation_duration() -> f32 {
    3.0
}

impl BossDefinition {
    /// Intro script, if this boss talks before fighting.
    pub fn dialogue_script(&self) -> Option<DialogueScript> {
        if !self.has_intro_dialogue || self.dialogue_lines.is_empty() {
            return None;
        }

        Some(DialogueScript {
            speaker: self.name.clone(),
            lines: self.dialogue_lines.clone(),
            line_delay: self.dialogue_line_delay,
            voice_sound: self.voice_sound.clone(),
        })
    }

    /// Convert to the runtime encounter configuration.
    pub fn to_config(&self) -> EncounterConfig {
        EncounterConfig {
            name: self.name.clone(),
            max_health: self.max_health,
            detection_range: self.detection_range,
            move_speed: self.move_speed,
            rotation_speed: self.rotation_speed,
            dialogue: self.dialogue_script(),
            hurt_sound: self.hurt_sound.clone(),
            hit_flash_duration: self.hit_flash_duration,
            hit_color: Color::srgba(self.hit_color[0], self.hit_color[1], self.hit_color[2], self.hit_color[3]),
            death_sound: self.death_sound.clone(),
            death_animation_duration: self.death_animation_duration,
            attacks: self.attacks.clone(),
        }
    }
}

/// Resource holding all loaded boss definitions.
#[derive(Resource, Default)]
pub struct BossRegistry {
    pub definitions: HashMap<String, BossDefinition>,
}

impl BossRegistry {
    /// Get a boss definition by type name (the RON file stem).
    pub fn get(&self, boss_type: &str) -> Option<&BossDefinition> {
        self.definitions.get(boss_type)
    }

    /// Load every `.ron` file in `dir`. Broken files are logged and skipped.
    ///
    /// Returns the number of definitions loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, BossDataError> {
        if !dir.exists() {
            return Err(BossDataError::DirectoryNotFound(dir.display().to_string()));
        }

        let entries = fs::read_dir(dir).map_err(|e| BossDataError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }

            let boss_type = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
                .to_string();

            match read_boss_definition(&path) {
                Ok(definition) => {
                    info!("Loaded boss definition: {} ({})", definition.name, boss_type);
                    self.definitions.insert(boss_type, definition);
                    loaded += 1;
                }
                Err(e) => error!("{}", e),
            }
        }

        Ok(loaded)
    }
}

/// Parse a single boss definition. `path` is only used in error messages.
pub fn parse_boss_definition(contents: &str, path: &str) -> Result<BossDefinition, BossDataError> {
    ron::from_str::<BossDefinition>(contents).map_err(|e| BossDataError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

pub fn read_boss_definition(path: &Path) -> Result<BossDefinition, BossDataError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| BossDataError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_boss_definition(&contents, &display)
}

/// Load all boss definitions from the assets/data/bosses/ directory.
pub fn load_boss_definitions(mut registry: ResMut<BossRegistry>) {
    match registry.load_dir(Path::new(BOSS_DATA_DIR)) {
        Ok(count) => info!("Loaded {} boss definitions", count),
        Err(e) => warn!("Boss definitions not loaded: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss::attack::AttackKind;

    const WARDEN: &str = include_str!("../../assets/data/bosses/warden.ron");

    #[test]
    fn shipped_warden_parses() {
        let warden = parse_boss_definition(WARDEN, "warden.ron").unwrap();
        assert_eq!(warden.name, "The Warden");
        assert_eq!(warden.attacks.len(), 3);
        assert!(warden.attacks.iter().all(AttackDefinition::is_valid));
        assert!(matches!(warden.attacks[2].kind, AttackKind::Jump(_)));
        assert!(warden.dialogue_script().is_some());
    }

    #[test]
    fn optional_fields_take_defaults() {
        let minimal = r#"(
            name: "Husk",
            max_health: 4,
            detection_range: 10.0,
            move_speed: 2.0,
            rotation_speed: 4.0,
            attacks: [
                (
                    name: "Claw",
                    kind: Melee((hit_radius: 1.5)),
                    damage: 1,
                    cooldown: 1.0,
                    range: 2.0,
                ),
            ],
        )"#;

        let husk = parse_boss_definition(minimal, "husk.ron").unwrap();
        assert_eq!(husk.death_animation_duration, 3.0);
        assert!(!husk.destroy_on_death);
        assert!(husk.rng_seed.is_none());
        assert!(husk.dialogue_script().is_none());
        assert_eq!(husk.hit_flash_duration, 0.1);
        assert_eq!(husk.hit_color, [1.0, 0.0, 0.0, 1.0]);

        let claw = &husk.attacks[0];
        assert!(claw.enabled);
        assert_eq!(claw.animation_trigger.as_deref(), Some("Attack"));

        let config = husk.to_config();
        assert_eq!(config.max_health, 4);
        assert!(config.dialogue.is_none());
        assert_eq!(config.hit_color, Color::srgba(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn dialogue_needs_flag_and_lines() {
        let mut warden = parse_boss_definition(WARDEN, "warden.ron").unwrap();
        warden.has_intro_dialogue = false;
        assert!(warden.dialogue_script().is_none());
    }

    #[test]
    fn parse_errors_name_the_file() {
        let err = parse_boss_definition("(name: ", "broken.ron").unwrap_err();
        assert!(matches!(err, BossDataError::ParseError { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn missing_directory_is_reported() {
        let mut registry = BossRegistry::default();
        let result = registry.load_dir(Path::new("does/not/exist"));
        assert!(matches!(result, Err(BossDataError::DirectoryNotFound(_))));
    }
}
