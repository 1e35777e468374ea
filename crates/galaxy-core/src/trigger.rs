//! One-shot activation of the heart emitter.
//!
//! `Dormant -> Armed -> Active`. Arming happens once, a fixed delay after the
//! scene starts, and only for scenes with `is_heart`. The first double click
//! (or two taps inside the double-tap window) while armed latches `Active`;
//! nothing leaves `Active`.

use crate::constants::{DOUBLE_TAP_WINDOW_MS, DRIFT_FADE_MS, HEART_ARM_DELAY_MS, HINT_LIFETIME_MS};
use crate::session::SceneEvent;
use smallvec::{smallvec, SmallVec};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeartPhase {
    Dormant,
    Armed,
    Active,
}

/// Side effects of a latching transition, in the order they apply.
pub type TransitionEffects = SmallVec<[SceneEvent; 3]>;

#[derive(Clone, Debug)]
pub struct HeartTrigger {
    enabled: bool,
    phase: HeartPhase,
    arm_at_ms: f64,
    hint_expires_ms: Option<f64>,
    last_tap_ms: Option<f64>,
    activated_ms: Option<f64>,
    heart_started: bool,
}

impl HeartTrigger {
    pub fn new(is_heart: bool, now_ms: f64) -> Self {
        Self {
            enabled: is_heart,
            phase: HeartPhase::Dormant,
            arm_at_ms: now_ms + HEART_ARM_DELAY_MS,
            hint_expires_ms: None,
            last_tap_ms: None,
            activated_ms: None,
            heart_started: false,
        }
    }

    #[inline]
    pub fn phase(&self) -> HeartPhase {
        self.phase
    }

    /// True once the transition has begun; drift text stops observing frames.
    #[inline]
    pub fn is_latched(&self) -> bool {
        self.phase == HeartPhase::Active
    }

    #[inline]
    pub fn heart_started(&self) -> bool {
        self.heart_started
    }

    #[inline]
    pub fn hint_visible(&self) -> bool {
        self.hint_expires_ms.is_some()
    }

    /// Advance timers: arming, hint expiry and the post-fade heart start.
    pub fn poll(&mut self, now_ms: f64, out: &mut Vec<SceneEvent>) {
        if self.phase == HeartPhase::Dormant && self.enabled && now_ms >= self.arm_at_ms {
            self.phase = HeartPhase::Armed;
            self.hint_expires_ms = Some(now_ms + HINT_LIFETIME_MS);
            log::info!("[heart] armed; double click to open");
            out.push(SceneEvent::HintShown);
        }
        if matches!(self.hint_expires_ms, Some(t) if now_ms >= t) && self.dismiss_hint() {
            out.push(SceneEvent::HintDismissed);
        }
        if let Some(at) = self.activated_ms {
            if !self.heart_started && now_ms >= at + DRIFT_FADE_MS {
                self.heart_started = true;
                log::info!("[heart] emitter started");
                out.push(SceneEvent::HeartActivated);
            }
        }
    }

    /// Hide the hint if it is still up. Safe to call from several paths.
    pub fn dismiss_hint(&mut self) -> bool {
        self.hint_expires_ms.take().is_some()
    }

    pub fn double_click(&mut self, now_ms: f64) -> TransitionEffects {
        if self.phase != HeartPhase::Armed {
            return TransitionEffects::new();
        }
        self.phase = HeartPhase::Active;
        self.activated_ms = Some(now_ms);
        self.last_tap_ms = None;
        log::info!("[heart] activated; fading drift field");
        let mut fx: TransitionEffects = smallvec![];
        if self.dismiss_hint() {
            fx.push(SceneEvent::HintDismissed);
        }
        fx.push(SceneEvent::DriftFrozen {
            fade_ms: DRIFT_FADE_MS,
        });
        fx
    }

    /// Touch end while listening for a double tap.
    pub fn tap(&mut self, now_ms: f64) -> TransitionEffects {
        if self.phase != HeartPhase::Armed {
            return TransitionEffects::new();
        }
        let is_double = matches!(self.last_tap_ms, Some(prev) if now_ms - prev < DOUBLE_TAP_WINDOW_MS);
        self.last_tap_ms = Some(now_ms);
        if is_double {
            self.double_click(now_ms)
        } else {
            TransitionEffects::new()
        }
    }
}
