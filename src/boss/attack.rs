//! Attack definitions.

use bevy::prelude::*;
use serde::Deserialize;

/// One configurable boss attack.
///
/// Definitions are read from boss data files and never change during a
/// session. Runtime cooldown state lives next to the definition in the
/// [`AttackCatalog`](super::catalog::AttackCatalog).
#[derive(Deserialize, Clone, Debug)]
pub struct AttackDefinition {
    pub name: String,
    pub kind: AttackKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub damage: u32,
    /// Seconds between two uses.
    pub cooldown: f32,
    /// Maximum target distance at which the attack can be selected.
    pub range: f32,
    /// Seconds from attack start to the damage/fire moment.
    #[serde(default)]
    pub damage_delay: f32,
    /// Total length of the attack in seconds.
    #[serde(default)]
    pub duration: f32,
    #[serde(default = "default_animation_trigger")]
    pub animation_trigger: Option<String>,
    #[serde(default)]
    pub sound: Option<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_animation_trigger() -> Option<String> {
    Some("Attack".to_string())
}

/// Kind-specific attack parameters.
#[derive(Deserialize, Clone, Debug)]
pub enum AttackKind {
    Melee(MeleeParams),
    Ranged(RangedParams),
    Jump(JumpParams),
}

#[derive(Deserialize, Clone, Debug)]
pub struct MeleeParams {
    /// Target must be this close when the blow lands.
    pub hit_radius: f32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RangedParams {
    /// What gets fired. `None` leaves the attack without projectiles.
    #[serde(default)]
    pub projectile: Option<ProjectileDefinition>,
    pub projectile_speed: f32,
    #[serde(default = "default_projectile_count")]
    pub projectile_count: u32,
    /// Total fan angle in degrees.
    #[serde(default)]
    pub spread_angle: f32,
    /// Spawn point relative to the boss, in the boss's local frame.
    #[serde(default)]
    pub spawn_offset: [f32; 3],
}

fn default_projectile_count() -> u32 {
    1
}

impl RangedParams {
    pub fn spawn_offset(&self) -> Vec3 {
        Vec3::from_array(self.spawn_offset)
    }

    /// Flight directions for one volley, fanned around `forward`.
    ///
    /// A single projectile flies straight ahead; more projectiles are spaced
    /// evenly from `-spread/2` to `+spread/2` around the vertical axis.
    pub fn volley_directions(&self, forward: Vec3) -> Vec<Vec3> {
        match self.projectile_count {
            0 => Vec::new(),
            1 => vec![forward],
            count => {
                let start = -self.spread_angle / 2.0;
                let step = self.spread_angle / (count - 1) as f32;
                (0..count)
                    .map(|i| {
                        let angle = (start + step * i as f32).to_radians();
                        Quat::from_rotation_y(angle) * forward
                    })
                    .collect()
            }
        }
    }
}

/// Physical properties of a fired projectile.
#[derive(Deserialize, Clone, Debug)]
pub struct ProjectileDefinition {
    #[serde(default = "default_projectile_radius")]
    pub radius: f32,
    /// Seconds before an unspent projectile is removed.
    #[serde(default = "default_projectile_lifetime")]
    pub lifetime: f32,
}

fn default_projectile_radius() -> f32 {
    0.25
}

fn default_projectile_lifetime() -> f32 {
    5.0
}

impl Default for ProjectileDefinition {
    fn default() -> Self {
        Self {
            radius: default_projectile_radius(),
            lifetime: default_projectile_lifetime(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct JumpParams {
    pub jump_height: f32,
    pub jump_duration: f32,
    pub aoe_radius: f32,
    /// Seconds the landing zone is shown before the boss takes off.
    pub telegraph_duration: f32,
    #[serde(default = "default_telegraph_color")]
    pub telegraph_color: [f32; 4],
    #[serde(default)]
    pub land_sound: Option<String>,
}

fn default_telegraph_color() -> [f32; 4] {
    [1.0, 0.0, 0.0, 0.5]
}

impl JumpParams {
    pub fn telegraph_color(&self) -> Color {
        let [r, g, b, a] = self.telegraph_color;
        Color::srgba(r, g, b, a)
    }
}

impl AttackDefinition {
    /// Reasons this definition can never be used, if any.
    ///
    /// Broken definitions are not rejected at load time; the catalog simply
    /// never offers them.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut check = |label: &str, value: f32| {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{label} must be a finite value >= 0 (got {value})"));
            }
        };
        check("cooldown", self.cooldown);
        check("range", self.range);
        check("damage_delay", self.damage_delay);
        check("duration", self.duration);

        match &self.kind {
            AttackKind::Melee(params) => check("hit_radius", params.hit_radius),
            AttackKind::Ranged(params) => {
                check("projectile_speed", params.projectile_speed);
                check("spread_angle", params.spread_angle);
            }
            AttackKind::Jump(params) => {
                check("jump_height", params.jump_height);
                check("jump_duration", params.jump_duration);
                check("aoe_radius", params.aoe_radius);
                check("telegraph_duration", params.telegraph_duration);
            }
        }

        if self.damage_delay > self.duration {
            errors.push(format!(
                "damage_delay ({}) exceeds duration ({})",
                self.damage_delay, self.duration
            ));
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    pub fn melee(name: &str, damage: u32, cooldown: f32, range: f32, hit_radius: f32) -> Self {
        Self::new(name, AttackKind::Melee(MeleeParams { hit_radius }), damage, cooldown, range)
    }

    pub fn new(name: &str, kind: AttackKind, damage: u32, cooldown: f32, range: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            enabled: true,
            damage,
            cooldown,
            range,
            damage_delay: 0.3,
            duration: 0.8,
            animation_trigger: default_animation_trigger(),
            sound: None,
        }
    }

    pub fn with_timing(mut self, damage_delay: f32, duration: f32) -> Self {
        self.damage_delay = damage_delay;
        self.duration = duration;
        self
    }
}
