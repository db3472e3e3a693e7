//! Application-level configuration constants.

// Spin duration (seconds)
pub const MIN_SPIN_SECS: f64 = 2.0;
pub const MAX_SPIN_SECS: f64 = 8.0;
pub const SPIN_STEP_SECS: f64 = 0.5;
pub const DEFAULT_SPIN_SECS: f64 = 5.0;

// Speed label thresholds
pub const FAST_BELOW_SECS: f64 = 3.0;
pub const MEDIUM_BELOW_SECS: f64 = 5.0;

// Spin angle (degrees)
pub const FULL_TURN_DEG: u32 = 360;
pub const BASE_ROTATION_DEG: u32 = 1080; // three full turns
pub const EXTRA_ROTATION_DEG: u32 = 720;

// Spin guard
pub const MIN_OPTIONS_TO_SPIN: usize = 2;

// Sounds
pub const SPIN_SOUND_SRC: &str = "/sounds/spin.mp3";
pub const WIN_SOUND_SRC: &str = "/sounds/win.mp3";

// Confetti
pub const CONFETTI_COUNT: usize = 150;
pub const CONFETTI_LIFETIME_FRAMES: u32 = 200;
pub const CONFETTI_GRAVITY: f64 = 0.5;
pub const CONFETTI_FRAME_MS: u32 = 16;
pub const CONFETTI_COLORS: [&str; 5] = ["#3498db", "#2980b9", "#ffffff", "#f1c40f", "#e74c3c"];

// Toasts
pub const TOAST_MS: u32 = 3_000;
pub const WINNER_TOAST_MS: u32 = 5_000;

// Wheel drawing (SVG user units)
pub const WHEEL_RADIUS: f64 = 100.0;
pub const LABEL_RADIUS_RATIO: f64 = 0.62;
pub const LABEL_MAX_CHARS: usize = 14;
