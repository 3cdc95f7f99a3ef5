//! Flappy Chicken - a side-scrolling reflex arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle track, collisions, session modes)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences, persisted as JSON
//! - `highscores`: Score recording leaderboard
//! - `audio`: Maps simulation events onto sound cues
//! - `platform`: Tick pacing and tick-rate measurement

pub mod audio;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (one tick per display refresh)
    pub const TICK_RATE: u32 = 60;

    /// Windowed viewport size
    pub const DEFAULT_VIEWPORT_WIDTH: u32 = 800;
    pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 450;
    /// Fallback fullscreen size when the platform can't report one
    pub const DEFAULT_FULLSCREEN_WIDTH: u32 = 1920;
    pub const DEFAULT_FULLSCREEN_HEIGHT: u32 = 1080;

    /// Upward acceleration per tick while lift is held
    pub const LIFT_ACCEL: f32 = 0.3;
    /// Downward acceleration per tick
    pub const GRAVITY_ACCEL: f32 = 0.2;
    /// Degrees of tilt per unit of vertical velocity (times -90)
    pub const ANGLE_GAIN: f32 = 0.04;
    /// Tilt is clamped to +/- this many degrees
    pub const MAX_TILT_DEGREES: f32 = 60.0;
    /// Ground line as a fraction of viewport height
    pub const GROUND_RATIO: f32 = 0.82;

    /// Obstacle scroll speed per tick as a fraction of viewport width
    pub const SCROLL_SPEED_RATIO: f32 = 0.005;
    /// Obstacle width in pixels at spawn
    pub const OBSTACLE_WIDTH: f32 = 100.0;

    /// Parallax background layers: far, middle, near (pixels per tick)
    pub const PARALLAX_SPEEDS: [f32; 3] = [0.5, 1.0, 3.0];
}

/// Clamp a tilt angle into the displayable range
#[inline]
pub fn clamp_tilt(angle: f32, max_degrees: f32) -> f32 {
    angle.clamp(-max_degrees, max_degrees)
}

/// Wrap a scrolling background offset so it stays within one layer width.
///
/// Offsets only ever decrease, so once a layer has scrolled a full width
/// to the left it starts over.
#[inline]
pub fn wrap_offset(offset: f32, layer_width: f32) -> f32 {
    if layer_width <= 0.0 {
        return offset;
    }
    let mut offset = offset;
    while offset < -layer_width {
        offset += layer_width;
    }
    offset
}
