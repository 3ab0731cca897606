//! Movement domain: temporary factors on speed and jump forces.

use bevy::prelude::*;

pub const MIN_FACTOR: f32 = 0.001;
pub const MAX_FACTOR_TIME: f32 = 60.0;

#[derive(Debug, Clone, PartialEq)]
struct TimedFactor {
    source: String,
    factor: f32,
    remaining: f32,
}

/// Multiplicative slowdowns that expire on their own timers.
#[derive(Component, Debug, Default, Clone)]
pub struct SpeedModifiers {
    movement: Vec<TimedFactor>,
    jumping: Vec<TimedFactor>,
    landing: bool,
}

fn clamp_request(source: impl Into<String>, factor: f32, time: f32) -> TimedFactor {
    TimedFactor {
        source: source.into(),
        factor: factor.clamp(MIN_FACTOR, 1.0),
        remaining: time.clamp(0.0, MAX_FACTOR_TIME),
    }
}

impl SpeedModifiers {
    /// Scale max speed by `factor` for `time` seconds on behalf of `source`.
    pub fn slow_down_movement(&mut self, source: impl Into<String>, factor: f32, time: f32) {
        self.movement.push(clamp_request(source, factor, time));
    }

    /// Scale both jump forces by `factor` for `time` seconds.
    pub fn slow_down_jumping(&mut self, source: impl Into<String>, factor: f32, time: f32) {
        self.jumping.push(clamp_request(source, factor, time));
    }

    /// Drop every factor `source` requested; other factors keep running.
    pub fn clear_source(&mut self, source: &str) {
        self.movement.retain(|entry| entry.source != source);
        self.jumping.retain(|entry| entry.source != source);
    }

    pub fn slow_on_landing(&mut self) {
        self.landing = true;
    }

    pub fn landing_finished(&mut self) {
        self.landing = false;
    }

    pub fn tick(&mut self, dt: f32) {
        for list in [&mut self.movement, &mut self.jumping] {
            for entry in list.iter_mut() {
                entry.remaining -= dt;
            }
            list.retain(|entry| entry.remaining > 0.0);
        }
    }

    pub fn movement_factor(&self, landing_slowness: f32) -> f32 {
        let timed: f32 = self.movement.iter().map(|e| e.factor).product();
        if self.landing {
            timed * (1.0 - landing_slowness.clamp(0.0, 0.999))
        } else {
            timed
        }
    }

    pub fn jump_factor(&self) -> f32 {
        self.jumping.iter().map(|e| e.factor).product()
    }
}
