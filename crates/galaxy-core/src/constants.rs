// Shared tuning constants used by both web and native frontends.

// Drift field
pub const DRIFT_BASE_DURATION_SEC: f32 = 3.0;
pub const DRIFT_DURATION_JITTER_SEC: f32 = 2.0;
pub const DRIFT_START_Y_PX: f32 = -150.0; // spawn just below the visible area
pub const DRIFT_EXIT_MARGIN_PX: f32 = 150.0; // added past the viewport height
pub const DRIFT_MIN_DEPTH_OPACITY: f32 = 0.4;
pub const ICON_PROBABILITY: f32 = 0.3;
pub const IMAGE_PROBABILITY: f32 = 0.08;
pub const IMAGE_MIN_WIDTH_PX: f32 = 60.0;
pub const IMAGE_WIDTH_JITTER_PX: f32 = 40.0;
pub const BURST_SPACING_FRACTION: f64 = 0.6; // of the spawn interval
pub const MAX_CATCH_UP_TICKS: usize = 5; // periodic spawns per frame before resyncing

// Opacity envelopes: (edge window as fraction of progress, ramp gain)
pub const TEXT_ENVELOPE_EDGE: f32 = 0.1;
pub const TEXT_ENVELOPE_GAIN: f32 = 10.0;
pub const IMAGE_ENVELOPE_EDGE: f32 = 0.05;
pub const IMAGE_ENVELOPE_GAIN: f32 = 20.0;

// Interaction
pub const SPEED_MULTIPLIER_IDLE: f32 = 1.3;
pub const SPEED_MULTIPLIER_HELD: f32 = 1.7;
pub const SPEED_MULTIPLIER_RELEASED: f32 = 1.0;
pub const TOUCH_DRAG_SENSITIVITY: f32 = 0.3;
pub const CAMERA_MIN_SCALE: f32 = 0.5;
pub const CAMERA_MAX_SCALE: f32 = 2.0;

// Heart trigger timing (milliseconds)
pub const HEART_ARM_DELAY_MS: f64 = 8000.0;
pub const HINT_LIFETIME_MS: f64 = 3000.0;
pub const DOUBLE_TAP_WINDOW_MS: f64 = 500.0;
pub const DRIFT_FADE_MS: f64 = 1500.0;

// Heart emitter
pub const HEART_PARTICLE_DURATION_SEC: f32 = 4.0;
pub const HEART_EFFECT: f32 = -1.3; // acceleration = velocity * effect
pub const HEART_STAMP_SCALE: f32 = 350.0; // curve units per stamp size
pub const HEART_OUTLINE_STEP: f32 = 0.01;
pub const HEART_FILL_COLOR: &str = "#f50b02";

// Scene defaults
pub const DEFAULT_PARTICLE_COLOR: &str = "#ff6b9d";
pub const SONG_DIR: &str = "songs";
