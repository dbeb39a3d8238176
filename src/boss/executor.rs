//! Runs a single attack from wind-up to recovery.
//!
//! An [`AttackExecution`] is a small state machine advanced once per tick with
//! the frame delta. Nothing here sleeps or spawns tasks; every wait is just a
//! phase plus the time already spent in it.

use std::f32::consts::PI;

use bevy::prelude::*;

use super::attack::{AttackDefinition, AttackKind, JumpParams, RangedParams};
use super::host::{present_sound, EncounterHost, PresentationSignal, ProjectileSpawn};
use super::telegraph::{TelegraphHandle, TelegraphSlot};

/// Pause after a jump lands before the boss acts again.
pub const JUMP_SETTLE_DELAY: f32 = 0.5;

/// What an execution may touch while it runs.
pub struct AttackContext<'a, H: EncounterHost + ?Sized> {
    pub attack: &'a AttackDefinition,
    /// The boss pose. Only the running execution writes it.
    pub boss: &'a mut Transform,
    pub ground_y: f32,
    pub target: Entity,
    pub telegraph: &'a mut TelegraphSlot,
    pub host: &'a mut H,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutionPhase {
    /// Waiting for `damage_delay` before the blow lands or the volley fires.
    Windup,
    /// Waiting out the rest of `duration`.
    Recovery,
    /// Landing zone shown, boss still on the ground.
    Telegraph { handle: TelegraphHandle, landing: Vec3 },
    Airborne {
        handle: TelegraphHandle,
        start: Vec3,
        landing: Vec3,
    },
    Settle,
    Complete,
}

/// One in-flight attack.
#[derive(Debug, Clone)]
pub struct AttackExecution {
    attack: usize,
    phase: ExecutionPhase,
    elapsed: f32,
}

impl AttackExecution {
    /// Begin attack number `attack` (catalog index). Cooldown bookkeeping is
    /// the caller's job.
    pub fn start<H: EncounterHost + ?Sized>(attack: usize, ctx: &mut AttackContext<H>) -> Self {
        let definition = ctx.attack;
        let phase = match &definition.kind {
            AttackKind::Melee(_) => {
                signal_attack(ctx);
                ExecutionPhase::Windup
            }
            AttackKind::Ranged(_) => {
                face_target_now(ctx);
                signal_attack(ctx);
                ExecutionPhase::Windup
            }
            AttackKind::Jump(params) => {
                let landing = match ctx.host.position_of(ctx.target) {
                    Some(position) => Vec3::new(position.x, ctx.ground_y, position.z),
                    None => {
                        warn!(
                            "'{}' has no target to jump at, landing in place",
                            definition.name
                        );
                        Vec3::new(ctx.boss.translation.x, ctx.ground_y, ctx.boss.translation.z)
                    }
                };
                let handle = ctx.telegraph.show(
                    landing,
                    params.aoe_radius,
                    params.telegraph_color(),
                    params.telegraph_duration,
                    &mut *ctx.host,
                );
                ExecutionPhase::Telegraph { handle, landing }
            }
        };

        Self {
            attack,
            phase,
            elapsed: 0.0,
        }
    }

    /// Catalog index of the attack being run.
    pub fn attack(&self) -> usize {
        self.attack
    }

    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    pub fn advance<H: EncounterHost + ?Sized>(&mut self, dt: f32, ctx: &mut AttackContext<H>) -> ExecutionStatus {
        self.elapsed += dt;

        // Several short phases can finish within one tick
        loop {
            match self.phase {
                ExecutionPhase::Windup => {
                    let delay = ctx.attack.damage_delay;
                    if self.elapsed < delay {
                        return ExecutionStatus::Running;
                    }
                    self.elapsed -= delay;
                    resolve_blow(ctx);
                    self.phase = ExecutionPhase::Recovery;
                }
                ExecutionPhase::Recovery => {
                    let remaining = (ctx.attack.duration - ctx.attack.damage_delay).max(0.0);
                    if self.elapsed < remaining {
                        return ExecutionStatus::Running;
                    }
                    self.elapsed -= remaining;
                    self.phase = ExecutionPhase::Complete;
                }
                ExecutionPhase::Telegraph { handle, landing } => {
                    let Some(params) = jump_params(ctx.attack) else {
                        self.phase = ExecutionPhase::Complete;
                        continue;
                    };
                    if self.elapsed < params.telegraph_duration {
                        return ExecutionStatus::Running;
                    }
                    self.elapsed -= params.telegraph_duration;
                    signal_attack(ctx);
                    self.phase = ExecutionPhase::Airborne {
                        handle,
                        start: ctx.boss.translation,
                        landing,
                    };
                }
                ExecutionPhase::Airborne {
                    handle,
                    start,
                    landing,
                } => {
                    let Some(params) = jump_params(ctx.attack) else {
                        self.phase = ExecutionPhase::Complete;
                        continue;
                    };
                    if self.elapsed < params.jump_duration {
                        let t = self.elapsed / params.jump_duration;
                        ctx.boss.translation = arc_position(start, landing, ctx.ground_y, params.jump_height, t);
                        return ExecutionStatus::Running;
                    }
                    self.elapsed -= params.jump_duration;
                    land(ctx, params, handle, landing);
                    self.phase = ExecutionPhase::Settle;
                }
                ExecutionPhase::Settle => {
                    if self.elapsed < JUMP_SETTLE_DELAY {
                        return ExecutionStatus::Running;
                    }
                    self.elapsed -= JUMP_SETTLE_DELAY;
                    self.phase = ExecutionPhase::Complete;
                }
                ExecutionPhase::Complete => return ExecutionStatus::Complete,
            }
        }
    }
}

/// Position along a jump: straight line on the ground plane, sine arc above it.
pub fn arc_position(start: Vec3, landing: Vec3, ground_y: f32, height: f32, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    Vec3::new(
        start.x + (landing.x - start.x) * t,
        ground_y + (t * PI).sin() * height,
        start.z + (landing.z - start.z) * t,
    )
}

fn jump_params(attack: &AttackDefinition) -> Option<&JumpParams> {
    match &attack.kind {
        AttackKind::Jump(params) => Some(params),
        _ => None,
    }
}

fn signal_attack<H: EncounterHost + ?Sized>(ctx: &mut AttackContext<H>) {
    if let Some(trigger) = &ctx.attack.animation_trigger {
        ctx.host.present(PresentationSignal::PlayAnimation(trigger.clone()));
    }
    present_sound(&mut *ctx.host, ctx.attack.sound.as_deref());
}

fn face_target_now<H: EncounterHost + ?Sized>(ctx: &mut AttackContext<H>) {
    let Some(target) = ctx.host.position_of(ctx.target) else {
        return;
    };
    let look_target = Vec3::new(target.x, ctx.boss.translation.y, target.z);
    if look_target.distance_squared(ctx.boss.translation) > f32::EPSILON {
        ctx.boss.look_at(look_target, Vec3::Y);
    }
}

/// The damage moment of a melee or ranged attack.
fn resolve_blow<H: EncounterHost + ?Sized>(ctx: &mut AttackContext<H>) {
    let attack = ctx.attack;
    match &attack.kind {
        AttackKind::Melee(params) => {
            let Some(target) = ctx.host.position_of(ctx.target) else {
                debug!("'{}' swung at a missing target", ctx.attack.name);
                return;
            };
            if ctx.boss.translation.distance(target) <= params.hit_radius {
                ctx.host.apply_damage(ctx.target, ctx.attack.damage);
                debug!("'{}' hit its target for {}", ctx.attack.name, ctx.attack.damage);
            }
        }
        AttackKind::Ranged(params) => fire_volley(ctx, params),
        AttackKind::Jump(_) => {}
    }
}

fn fire_volley<H: EncounterHost + ?Sized>(ctx: &mut AttackContext<H>, params: &RangedParams) {
    let Some(projectile) = &params.projectile else {
        warn!("'{}' has no projectile configured, nothing fired", ctx.attack.name);
        return;
    };

    let origin = ctx.boss.translation + ctx.boss.rotation * params.spawn_offset();
    let forward = ctx.boss.forward().as_vec3();

    for direction in params.volley_directions(forward) {
        ctx.host.spawn_projectile(ProjectileSpawn {
            position: origin,
            direction,
            speed: params.projectile_speed,
            damage: ctx.attack.damage,
            radius: projectile.radius,
            lifetime: projectile.lifetime,
        });
    }
}

fn land<H: EncounterHost + ?Sized>(
    ctx: &mut AttackContext<H>,
    params: &JumpParams,
    handle: TelegraphHandle,
    landing: Vec3,
) {
    ctx.boss.translation = Vec3::new(landing.x, ctx.ground_y, landing.z);
    present_sound(&mut *ctx.host, params.land_sound.as_deref());
    ctx.telegraph.hide(handle, &mut *ctx.host);

    let center = ctx.boss.translation;
    for entity in ctx.host.find_within_radius(center, params.aoe_radius) {
        ctx.host.apply_damage(entity, ctx.attack.damage);
        debug!("'{}' landed on {:?}", ctx.attack.name, entity);
    }
}
