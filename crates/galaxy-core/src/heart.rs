//! Heart emitter: a dense particle stream whose origins trace a parametric
//! heart curve, recycled through a [`ParticlePool`].

use crate::constants::{
    HEART_EFFECT, HEART_OUTLINE_STEP, HEART_PARTICLE_DURATION_SEC, HEART_STAMP_SCALE,
};
use crate::device::TierProfile;
use crate::pool::{HeartParticle, ParticlePool};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

/// Point on the heart curve for `t` in `[-π, π]` (y up).
pub fn point_on_heart(t: f32) -> Vec2 {
    Vec2::new(
        160.0 * t.sin().powi(3),
        130.0 * t.cos() - 50.0 * (2.0 * t).cos() - 20.0 * (3.0 * t).cos() - 10.0 * (4.0 * t).cos()
            + 25.0,
    )
}

/// `v` rescaled to `length`, keeping its direction. Zero stays zero.
#[inline]
pub fn with_length(v: Vec2, length: f32) -> Vec2 {
    v.normalize_or_zero() * length
}

/// `(t - 1)^3 + 1`: 0 at t=0, 1 at t=1, fast start.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = t - 1.0;
    u * u * u + 1.0
}

/// Closed outline of the stamp image, in stamp pixel space (y down).
pub fn heart_outline(stamp_size: f32) -> Vec<Vec2> {
    let to_stamp = |t: f32| {
        let p = point_on_heart(t);
        Vec2::new(
            stamp_size / 2.0 + p.x * stamp_size / HEART_STAMP_SCALE,
            stamp_size / 2.0 - p.y * stamp_size / HEART_STAMP_SCALE,
        )
    };
    let steps = (2.0 * PI / HEART_OUTLINE_STEP).ceil() as usize;
    let mut points = Vec::with_capacity(steps + 1);
    let mut t = -PI;
    points.push(to_stamp(t));
    while t < PI {
        t += HEART_OUTLINE_STEP;
        points.push(to_stamp(t));
    }
    points
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSettings {
    pub length: usize,
    pub duration: f32,
    pub velocity: f32,
    pub effect: f32,
    pub size: f32,
}

impl HeartSettings {
    pub fn for_tier(profile: &TierProfile) -> Self {
        Self {
            length: profile.heart_pool_length,
            duration: HEART_PARTICLE_DURATION_SEC,
            velocity: profile.heart_velocity,
            effect: HEART_EFFECT,
            size: profile.heart_stamp_size,
        }
    }

    /// Particles emitted per second; keeps the pool just saturated.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.length as f32 / self.duration
    }

    pub fn sprite_for(&self, p: &HeartParticle) -> HeartSprite {
        let life = p.age / self.duration;
        HeartSprite {
            x: p.position.x,
            y: p.position.y,
            size: self.size * ease_out_cubic(life),
            alpha: 1.0 - life,
        }
    }
}

/// One stamp draw: centre, edge length and alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
}

pub struct HeartEmitter {
    settings: HeartSettings,
    pool: ParticlePool,
    last_time_sec: Option<f64>,
}

impl HeartEmitter {
    pub fn new(settings: HeartSettings) -> Self {
        Self {
            pool: ParticlePool::new(settings.length, settings.duration, settings.effect),
            settings,
            last_time_sec: None,
        }
    }

    #[inline]
    pub fn settings(&self) -> &HeartSettings {
        &self.settings
    }

    #[inline]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Seconds since the previous frame; 0 on the first.
    fn delta(&mut self, now_ms: f64) -> f32 {
        let now = now_ms / 1000.0;
        let dt = self.last_time_sec.map_or(0.0, |t| (now - t).max(0.0));
        self.last_time_sec = Some(now);
        dt as f32
    }

    /// Number of particles a frame of `dt` seconds emits.
    pub fn emit_count(&self, dt: f32) -> usize {
        let amount = self.settings.rate() * dt;
        if amount <= 0.0 {
            return 0;
        }
        // Beyond one full pool the extra adds only overwrite each other.
        (amount.ceil() as usize).min(self.pool.capacity())
    }

    /// Emit at a uniformly random curve parameter, centred in `canvas`.
    pub fn emit_one<R: Rng + ?Sized>(&mut self, canvas: Vec2, rng: &mut R) {
        let t = PI - 2.0 * PI * rng.gen::<f32>();
        let p = point_on_heart(t);
        let dir = with_length(p, self.settings.velocity);
        let center = canvas / 2.0;
        self.pool.add(
            Vec2::new(center.x + p.x, center.y - p.y),
            Vec2::new(dir.x, -dir.y),
        );
    }

    /// One render-loop step: emit, integrate, then write the draw list.
    pub fn frame<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        canvas: Vec2,
        rng: &mut R,
        sprites: &mut Vec<HeartSprite>,
    ) {
        let dt = self.delta(now_ms);
        for _ in 0..self.emit_count(dt) {
            self.emit_one(canvas, rng);
        }
        self.pool.update(dt);

        sprites.clear();
        let settings = self.settings;
        sprites.extend(self.pool.iter_active().map(|p| settings.sprite_for(p)));
    }
}
