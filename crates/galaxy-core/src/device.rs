//! Device classes and the budgets that depend on them.
//!
//! The tier is detected once at startup from the viewport width and the
//! pointer type. It is not re-evaluated on resize; orientation changes are
//! handled by the front-end reloading the page.

pub const SMALL_MAX_WIDTH_PX: f32 = 480.0;
pub const MOBILE_MAX_WIDTH_PX: f32 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
    Small,
    Mobile,
    Desktop,
}

impl DeviceTier {
    pub fn detect(viewport_width: f32, coarse_pointer: bool) -> Self {
        if viewport_width <= SMALL_MAX_WIDTH_PX {
            DeviceTier::Small
        } else if viewport_width <= MOBILE_MAX_WIDTH_PX || coarse_pointer {
            DeviceTier::Mobile
        } else {
            DeviceTier::Desktop
        }
    }

    /// Small and Mobile share most budgets.
    #[inline]
    pub fn is_compact(self) -> bool {
        !matches!(self, DeviceTier::Desktop)
    }

    pub fn profile(self) -> TierProfile {
        TierProfile::for_tier(self)
    }
}

/// All tier-dependent tuning values in one place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierProfile {
    pub tier: DeviceTier,
    pub max_particles: usize,
    pub spawn_interval_ms: f64,
    pub initial_burst: usize,
    pub depth_range: f32,
    pub depth_norm: f32,
    pub font_base_px: f32,
    pub font_jitter_px: f32,
    pub drag_sensitivity: f32,
    pub star_count: usize,
    pub heart_pool_length: usize,
    pub heart_velocity: f32,
    pub heart_stamp_size: f32,
}

impl TierProfile {
    pub fn for_tier(tier: DeviceTier) -> Self {
        let compact = tier.is_compact();
        let (max_particles, font_base_px, font_jitter_px, star_count) = match tier {
            DeviceTier::Small => (150, 8.0, 4.0, 250),
            DeviceTier::Mobile => (200, 12.0, 5.0, 350),
            DeviceTier::Desktop => (300, 18.0, 8.0, 500),
        };
        Self {
            tier,
            max_particles,
            spawn_interval_ms: if compact { 100.0 } else { 120.0 },
            initial_burst: if compact { 20 } else { 15 },
            depth_range: if compact { 300.0 } else { 500.0 },
            depth_norm: if compact { 250.0 } else { 400.0 },
            font_base_px,
            font_jitter_px,
            drag_sensitivity: if compact { 0.3 } else { 0.5 },
            star_count,
            heart_pool_length: if compact { 5000 } else { 10000 },
            heart_velocity: if compact { 50.0 } else { 80.0 },
            heart_stamp_size: if compact { 6.0 } else { 8.0 },
        }
    }
}
