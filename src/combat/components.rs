//! Combat domain: player health and level hazards.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::abilities::Shield;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Non-positive damage or an already dead player.
    Ignored,
    Absorbed,
    Hurt { remaining: i32 },
    Killed,
}

/// Integer hit points; the player dies at zero.
#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    current: i32,
    original: i32,
}

impl PlayerHealth {
    pub fn new(health: i32) -> Self {
        let health = health.max(1);
        Self {
            current: health,
            original: health,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn original(&self) -> i32 {
        self.original
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Damage goes through the shield first, if the player has one.
    pub fn take_damage(&mut self, damage: i32, shield: Option<&mut Shield>) -> DamageOutcome {
        if damage <= 0 || self.is_dead() {
            return DamageOutcome::Ignored;
        }

        let damage = match shield {
            Some(shield) if shield.has_ability() => shield.hit(damage),
            _ => damage,
        };
        if damage <= 0 {
            return DamageOutcome::Absorbed;
        }

        self.current = (self.current - damage).max(0);
        if self.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }

    pub fn kill(&mut self) {
        self.current = 0;
    }

    /// Ignored for hp <= 0 or a dead player.
    pub fn set_health(&mut self, hp: i32) -> bool {
        if hp <= 0 || self.is_dead() {
            return false;
        }
        self.current = hp;
        true
    }

    pub fn restore_health(&mut self) {
        self.current = self.original;
    }
}

/// Touching this kills the player outright.
#[derive(Component, Debug)]
pub struct KillZone;

#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub damage: i32,
    pub source: Entity,
    pub spawn: Vec2,
    /// Seconds left before despawn.
    pub lifetime: f32,
    pub despawn_distance: f32,
}

impl Projectile {
    /// Counts down the lifetime; true once the projectile should go.
    pub fn expire(&mut self, position: Vec2, dt: f32) -> bool {
        self.lifetime -= dt;
        self.lifetime <= 0.0 || position.distance(self.spawn) >= self.despawn_distance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    /// Seconds between shots.
    pub interval: f32,
    /// Degrees; 0 fires along +x, 90 along +y.
    pub angle: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    /// Sweep span above `angle`; 0 disables sweeping.
    pub max_angle_diff: f32,
    /// Rotate one way forever instead of sweeping back and forth.
    pub loop_rotation: bool,
    /// Upper bound of the random first-shot delay, as a fraction of `interval`.
    pub delay_sync_factor: f32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_lifetime: f32,
    pub projectile_despawn_distance: f32,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            interval: 1.0,
            angle: 0.0,
            rotation_speed: 20.0,
            max_angle_diff: 0.0,
            loop_rotation: false,
            delay_sync_factor: 0.2,
            projectile_speed: 300.0,
            projectile_damage: 1,
            projectile_lifetime: 30.0,
            projectile_despawn_distance: 1000.0,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Turret {
    config: TurretConfig,
    timer: f32,
    angle: f32,
    rising: bool,
}

impl Turret {
    /// `delay_factor` in 0..=1 pushes the first shot back so turrets built
    /// together don't fire in sync.
    pub fn new(config: TurretConfig, delay_factor: f32) -> Self {
        let interval = config.interval.max(0.01);
        Self {
            timer: interval * (1.0 + delay_factor.clamp(0.0, 1.0)),
            angle: config.angle,
            rising: true,
            config: TurretConfig { interval, ..config },
        }
    }

    pub fn config(&self) -> &TurretConfig {
        &self.config
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn aim(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }

    /// Rotate and count down. Returns how many shots to fire this frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.rotate(dt);

        self.timer -= dt;
        if self.timer > 0.0 {
            return 0;
        }
        self.timer = self.config.interval;
        // Frames longer than the interval fire the shots they skipped.
        ((dt / self.config.interval) as u32).max(1)
    }

    fn rotate(&mut self, dt: f32) {
        let step = self.config.rotation_speed * dt;

        if self.config.loop_rotation {
            self.angle = (self.angle + step).rem_euclid(360.0);
            return;
        }
        if step == 0.0 || self.config.max_angle_diff == 0.0 {
            return;
        }

        let low = self.config.angle;
        let high = low + self.config.max_angle_diff;
        self.angle += if self.rising { step } else { -step };
        if self.angle >= high {
            self.angle = high;
            self.rising = !self.rising;
        } else if self.angle <= low {
            self.angle = low;
            self.rising = !self.rising;
        }
    }
}
