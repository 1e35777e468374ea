// Page wiring: element ids, endpoints and banner timings

pub const API_BASE: &str = "https://dearlove-backend.onrender.com";

// Element ids provided by the host page
pub const LOADING_SCREEN_ID: &str = "loadingScreen";
pub const ERROR_SCREEN_ID: &str = "errorScreen";
pub const GALAXY_ID: &str = "galaxy";
pub const HEART_CONTAINER_ID: &str = "heartContainer";
pub const HEART_TEXT_ID: &str = "heartText";
pub const HEART_CANVAS_ID: &str = "pinkboard";
pub const AUDIO_ID: &str = "galaxyAudio";

// Elements created at runtime
pub const HINT_ID: &str = "doubleClickTip";
pub const MANUAL_PLAY_ID: &str = "manualPlayButton";
pub const AUDIO_ERROR_ID: &str = "audioError";

// Banner lifetimes (ms)
pub const MANUAL_PLAY_LIFETIME_MS: i32 = 10_000;
pub const MANUAL_PLAY_FADE_MS: i32 = 500;
pub const AUDIO_ERROR_LIFETIME_MS: i32 = 5_000;

pub const SONG_VOLUME: f64 = 0.7;
pub const ORIENTATION_RELOAD_DELAY_MS: i32 = 100;
