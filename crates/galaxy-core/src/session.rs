//! The single context object a viewer owns for its lifetime.
//!
//! Everything that used to be ambient page state (speed multiplier, camera,
//! live particle set, trigger latch) lives here, and all mutation goes through
//! `&mut AnimationSession` from one logical task.

use crate::config::SceneConfig;
use crate::device::{DeviceTier, TierProfile};
use crate::drift::{DriftField, DriftVisual, ParticleId};
use crate::heart::{HeartEmitter, HeartSettings, HeartSprite};
use crate::interaction::{CameraTransform, Interaction};
use crate::stars::{generate_starfield, Star};
use crate::trigger::{HeartPhase, HeartTrigger, TransitionEffects};
use glam::Vec2;
use rand::prelude::*;

/// Display changes produced by a session step, applied by the front-end.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    DriftSpawned {
        id: ParticleId,
        visual: DriftVisual,
        x_percent: f32,
        base_opacity: f32,
    },
    DriftMoved {
        id: ParticleId,
        y: f32,
        z: f32,
        opacity: f32,
    },
    DriftRetired {
        id: ParticleId,
    },
    HintShown,
    HintDismissed,
    /// Spawning stopped; fade whatever is still visible.
    DriftFrozen {
        fade_ms: f64,
    },
    /// Show the heart container and start calling `heart_frame`.
    HeartActivated,
    CameraChanged(CameraTransform),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub struct AnimationSession {
    config: SceneConfig,
    profile: TierProfile,
    rng: StdRng,
    interaction: Interaction,
    drift: DriftField,
    trigger: HeartTrigger,
    heart: Option<HeartEmitter>,
    pending: Vec<SceneEvent>,
}

impl AnimationSession {
    pub fn new(
        config: SceneConfig,
        viewport: Viewport,
        coarse_pointer: bool,
        now_ms: f64,
        seed: u64,
    ) -> Self {
        let profile = DeviceTier::detect(viewport.width, coarse_pointer).profile();
        log::info!(
            "[session] tier={:?} max_particles={} interval={}ms heart={}",
            profile.tier,
            profile.max_particles,
            profile.spawn_interval_ms,
            config.is_heart
        );
        Self {
            trigger: HeartTrigger::new(config.is_heart, now_ms),
            drift: DriftField::new(profile, viewport.height, now_ms),
            interaction: Interaction::new(profile.drag_sensitivity),
            rng: StdRng::seed_from_u64(seed),
            heart: None,
            pending: Vec::new(),
            config,
            profile,
        }
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn profile(&self) -> &TierProfile {
        &self.profile
    }

    /// New drift spawns exit past the new height; particles already in
    /// flight and the detected tier are unaffected.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.drift.set_viewport_height(viewport.height);
    }

    #[inline]
    pub fn drift(&self) -> &DriftField {
        &self.drift
    }


    #[inline]
    pub fn heart_phase(&self) -> HeartPhase {
        self.trigger.phase()
    }

    #[inline]
    pub fn trigger(&self) -> &HeartTrigger {
        &self.trigger
    }

    #[inline]
    pub fn heart(&self) -> Option<&HeartEmitter> {
        self.heart.as_ref()
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f32 {
        self.interaction.speed.get()
    }

    #[inline]
    pub fn camera(&self) -> CameraTransform {
        self.interaction.camera()
    }

    pub fn stars(&mut self) -> Vec<Star> {
        generate_starfield(&self.profile, &mut self.rng)
    }

    /// Spawn one text/icon particle now, subject to capacity and the latch.
    pub fn spawn_text_or_icon(&mut self, out: &mut Vec<SceneEvent>) -> Option<ParticleId> {
        let speed = self.interaction.speed.get();
        self.drift
            .spawn_text_or_icon(&self.config, speed, &mut self.rng, out)
    }

    pub fn spawn_image(&mut self, out: &mut Vec<SceneEvent>) -> Option<ParticleId> {
        let speed = self.interaction.speed.get();
        self.drift.spawn_image(&self.config, speed, &mut self.rng, out)
    }

    /// Per-frame step for everything except the heart canvas.
    pub fn tick(&mut self, now_ms: f64, out: &mut Vec<SceneEvent>) {
        out.append(&mut self.pending);

        self.trigger.poll(now_ms, out);
        if self.trigger.heart_started() && self.heart.is_none() {
            self.heart = Some(HeartEmitter::new(HeartSettings::for_tier(&self.profile)));
        }

        let speed = self.interaction.speed.get();
        self.drift
            .run_schedule(now_ms, &self.config, speed, &mut self.rng, out);
        self.drift.update(now_ms, out);

        if let Some(camera) = self.interaction.take_camera_update() {
            out.push(SceneEvent::CameraChanged(camera));
        }
    }

    /// Heart render-loop step. Returns false until the emitter is running.
    pub fn heart_frame(&mut self, now_ms: f64, canvas: Vec2, sprites: &mut Vec<HeartSprite>) -> bool {
        match self.heart.as_mut() {
            Some(heart) => {
                heart.frame(now_ms, canvas, &mut self.rng, sprites);
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.interaction.pointer_down(pos);
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.interaction.pointer_move(pos);
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    pub fn touch_start(&mut self, touches: &[Vec2]) {
        self.interaction.touch_start(touches);
    }

    pub fn touch_move(&mut self, touches: &[Vec2]) {
        self.interaction.touch_move(touches);
    }

    pub fn touch_end(&mut self) {
        self.interaction.touch_end();
    }

    /// Returns true when this click latched the heart transition.
    pub fn double_click(&mut self, now_ms: f64) -> bool {
        let fx = self.trigger.double_click(now_ms);
        self.apply_transition(fx)
    }

    /// Returns true when this tap completed a double tap and latched.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        let fx = self.trigger.tap(now_ms);
        self.apply_transition(fx)
    }

    /// Manual hint dismissal; a later expiry becomes a no-op.
    pub fn dismiss_hint(&mut self) {
        if self.trigger.dismiss_hint() {
            self.pending.push(SceneEvent::HintDismissed);
        }
    }

    fn apply_transition(&mut self, fx: TransitionEffects) -> bool {
        if fx.is_empty() {
            return false;
        }
        self.drift.freeze();
        self.pending.extend(fx);
        true
    }
}
