//! Drift-particle field: short-lived text, glyph and image particles that
//! float bottom-to-top across the viewport with a pseudo-3D depth offset.
//!
//! The field owns a single update list. One scheduler call per frame
//! ([`DriftField::update`]) steps every live particle and drops finished ones,
//! emitting [`SceneEvent`]s the front-end mirrors onto its display elements.

use crate::config::SceneConfig;
use crate::constants::{
    BURST_SPACING_FRACTION, DRIFT_BASE_DURATION_SEC, DRIFT_DURATION_JITTER_SEC,
    DRIFT_EXIT_MARGIN_PX, DRIFT_MIN_DEPTH_OPACITY, DRIFT_START_Y_PX, ICON_PROBABILITY,
    IMAGE_ENVELOPE_EDGE, IMAGE_ENVELOPE_GAIN, IMAGE_MIN_WIDTH_PX, IMAGE_PROBABILITY,
    IMAGE_WIDTH_JITTER_PX, MAX_CATCH_UP_TICKS, TEXT_ENVELOPE_EDGE, TEXT_ENVELOPE_GAIN,
};
use crate::device::TierProfile;
use crate::session::SceneEvent;
use rand::prelude::*;

pub type ParticleId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriftKind {
    Text,
    Icon,
    Image,
}

/// What a drift particle shows.
#[derive(Clone, Debug, PartialEq)]
pub enum DriftVisual {
    Text { text: String, font_px: f32 },
    Icon { glyph: String, font_px: f32 },
    Image { url: String, width_px: f32 },
}

impl DriftVisual {
    pub fn kind(&self) -> DriftKind {
        match self {
            DriftVisual::Text { .. } => DriftKind::Text,
            DriftVisual::Icon { .. } => DriftKind::Icon,
            DriftVisual::Image { .. } => DriftKind::Image,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DriftParticle {
    pub id: ParticleId,
    pub visual: DriftVisual,
    /// Horizontal position, percent of viewport width.
    pub x_percent: f32,
    /// Signed depth offset in px.
    pub z: f32,
    /// Opacity held through the middle of the flight.
    pub base_opacity: f32,
    pub duration_sec: f32,
    /// Global multiplier captured at spawn; never updated mid-flight.
    pub speed: f32,
    /// Viewport height when spawned. Fixes the exit line for the whole flight.
    pub viewport_height: f32,
    start_ms: Option<f64>,
}

impl DriftParticle {
    #[inline]
    pub fn kind(&self) -> DriftKind {
        self.visual.kind()
    }

    pub fn start_ms(&self) -> Option<f64> {
        self.start_ms
    }

    /// Vertical position at `progress` along this particle's own travel range.
    #[inline]
    pub fn y_at(&self, progress: f32) -> f32 {
        drift_y(progress, self.viewport_height)
    }

    /// Flight progress at `now_ms`; 0 until the first frame binds the start.
    pub fn progress(&self, now_ms: f64) -> f32 {
        let Some(start) = self.start_ms else {
            return 0.0;
        };
        let span_ms = self.duration_sec as f64 * 1000.0 * self.speed as f64;
        ((now_ms - start) / span_ms) as f32
    }

    pub fn opacity_at(&self, progress: f32) -> f32 {
        match self.kind() {
            DriftKind::Image => image_opacity(progress),
            DriftKind::Text | DriftKind::Icon => text_opacity(progress, self.base_opacity),
        }
    }
}

/// Three-segment envelope: linear ramp-in over `edge`, hold, linear ramp-out.
#[inline]
pub fn envelope(progress: f32, edge: f32, gain: f32, hold: f32) -> f32 {
    if progress < edge {
        progress * gain
    } else if progress > 1.0 - edge {
        (1.0 - progress) * gain
    } else {
        hold
    }
}

#[inline]
pub fn text_opacity(progress: f32, base_opacity: f32) -> f32 {
    envelope(progress, TEXT_ENVELOPE_EDGE, TEXT_ENVELOPE_GAIN, base_opacity)
}

#[inline]
pub fn image_opacity(progress: f32) -> f32 {
    envelope(progress, IMAGE_ENVELOPE_EDGE, IMAGE_ENVELOPE_GAIN, 1.0)
}

#[inline]
pub fn depth_opacity(z: f32, depth_norm: f32) -> f32 {
    (1.0 - z.abs() / depth_norm).max(DRIFT_MIN_DEPTH_OPACITY)
}

/// Vertical position (px from the top edge of the travel range).
#[inline]
pub fn drift_y(progress: f32, viewport_height: f32) -> f32 {
    let end = viewport_height + DRIFT_EXIT_MARGIN_PX;
    DRIFT_START_Y_PX + (end - DRIFT_START_Y_PX) * progress
}

#[derive(Clone, Debug)]
struct SpawnSchedule {
    origin_ms: f64,
    next_tick_ms: f64,
    burst_sent: usize,
}

pub struct DriftField {
    profile: TierProfile,
    particles: Vec<DriftParticle>,
    viewport_height: f32,
    next_id: ParticleId,
    frozen: bool,
    schedule: SpawnSchedule,
}

impl DriftField {
    pub fn new(profile: TierProfile, viewport_height: f32, now_ms: f64) -> Self {
        Self {
            profile,
            particles: Vec::with_capacity(profile.max_particles),
            viewport_height,
            next_id: 0,
            frozen: false,
            schedule: SpawnSchedule {
                origin_ms: now_ms,
                next_tick_ms: now_ms + profile.spawn_interval_ms,
                burst_sent: 0,
            },
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.profile.max_particles
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn particles(&self) -> &[DriftParticle] {
        &self.particles
    }

    #[inline]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Applies to particles spawned from now on; in-flight ones keep theirs.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Stop periodic spawning; text/icon particles leave on their next frame.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn spawn_text_or_icon<R: Rng + ?Sized>(
        &mut self,
        config: &SceneConfig,
        speed: f32,
        rng: &mut R,
        out: &mut Vec<SceneEvent>,
    ) -> Option<ParticleId> {
        if self.is_full() || self.frozen {
            log::trace!("[drift] text spawn dropped (len={})", self.len());
            return None;
        }
        let want_icon = rng.gen::<f32>() < ICON_PROBABILITY;
        let (pool, as_icon) = match (want_icon, config.icons.is_empty(), config.messages.is_empty()) {
            (true, false, _) | (false, false, true) => (&config.icons, true),
            (_, _, false) => (&config.messages, false),
            _ => return None,
        };
        let picked = pool.choose(rng)?.clone();

        let p = self.profile;
        let x_percent = rng.gen::<f32>() * 100.0;
        let z = (rng.gen::<f32>() - 0.5) * p.depth_range;
        let duration_sec = rng.gen::<f32>() * DRIFT_DURATION_JITTER_SEC + DRIFT_BASE_DURATION_SEC;
        let font_px = rng.gen::<f32>() * p.font_jitter_px + p.font_base_px;
        let visual = if as_icon {
            DriftVisual::Icon {
                glyph: picked,
                font_px,
            }
        } else {
            DriftVisual::Text {
                text: picked,
                font_px,
            }
        };
        let base_opacity = depth_opacity(z, p.depth_norm);
        Some(self.insert(visual, x_percent, z, base_opacity, duration_sec, speed, out))
    }

    /// Image particles ignore the freeze; callers gate them.
    pub fn spawn_image<R: Rng + ?Sized>(
        &mut self,
        config: &SceneConfig,
        speed: f32,
        rng: &mut R,
        out: &mut Vec<SceneEvent>,
    ) -> Option<ParticleId> {
        if !config.has_images() || self.is_full() {
            return None;
        }
        let url = config.images.choose(rng)?.clone();
        let width_px = rng.gen::<f32>() * IMAGE_WIDTH_JITTER_PX + IMAGE_MIN_WIDTH_PX;
        let x_percent = rng.gen::<f32>() * 100.0;
        let z = (rng.gen::<f32>() - 0.5) * self.profile.depth_range;
        let duration_sec = rng.gen::<f32>() * DRIFT_DURATION_JITTER_SEC + DRIFT_BASE_DURATION_SEC;
        let visual = DriftVisual::Image { url, width_px };
        Some(self.insert(visual, x_percent, z, 1.0, duration_sec, speed, out))
    }

    /// One scheduled spawn: occasionally an image, otherwise text/icon.
    pub fn spawn_random<R: Rng + ?Sized>(
        &mut self,
        config: &SceneConfig,
        speed: f32,
        rng: &mut R,
        out: &mut Vec<SceneEvent>,
    ) -> Option<ParticleId> {
        if config.has_images() && rng.gen::<f32>() < IMAGE_PROBABILITY {
            self.spawn_image(config, speed, rng, out)
        } else {
            self.spawn_text_or_icon(config, speed, rng, out)
        }
    }

    /// Run the initial burst and the periodic tick up to `now_ms`.
    pub fn run_schedule<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        config: &SceneConfig,
        speed: f32,
        rng: &mut R,
        out: &mut Vec<SceneEvent>,
    ) {
        let spacing = self.profile.spawn_interval_ms * BURST_SPACING_FRACTION;
        while self.schedule.burst_sent < self.profile.initial_burst {
            let due = self.schedule.origin_ms + self.schedule.burst_sent as f64 * spacing;
            if due > now_ms {
                break;
            }
            self.schedule.burst_sent += 1;
            self.spawn_random(config, speed, rng, out);
        }

        if self.frozen {
            return;
        }
        let mut ticks = 0;
        while now_ms >= self.schedule.next_tick_ms && ticks < MAX_CATCH_UP_TICKS {
            self.spawn_random(config, speed, rng, out);
            self.schedule.next_tick_ms += self.profile.spawn_interval_ms;
            ticks += 1;
        }
        if self.schedule.next_tick_ms <= now_ms {
            // Long stall (hidden tab): resync instead of bursting.
            self.schedule.next_tick_ms = now_ms + self.profile.spawn_interval_ms;
        }
    }

    /// Step every live particle to `now_ms` and retire finished ones.
    pub fn update(&mut self, now_ms: f64, out: &mut Vec<SceneEvent>) {
        let frozen = self.frozen;
        self.particles.retain_mut(|p| {
            if p.start_ms.is_none() {
                p.start_ms = Some(now_ms);
            }
            let progress = p.progress(now_ms);
            let halted = frozen && p.kind() != DriftKind::Image;
            if progress < 1.0 && !halted {
                out.push(SceneEvent::DriftMoved {
                    id: p.id,
                    y: p.y_at(progress),
                    z: p.z,
                    opacity: p.opacity_at(progress),
                });
                true
            } else {
                out.push(SceneEvent::DriftRetired { id: p.id });
                false
            }
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn insert(
        &mut self,
        visual: DriftVisual,
        x_percent: f32,
        z: f32,
        base_opacity: f32,
        duration_sec: f32,
        speed: f32,
        out: &mut Vec<SceneEvent>,
    ) -> ParticleId {
        let id = self.next_id;
        self.next_id += 1;
        out.push(SceneEvent::DriftSpawned {
            id,
            visual: visual.clone(),
            x_percent,
            base_opacity,
        });
        self.particles.push(DriftParticle {
            id,
            visual,
            x_percent,
            z,
            base_opacity,
            duration_sec,
            speed,
            viewport_height: self.viewport_height,
            start_ms: None,
        });
        id
    }
}
