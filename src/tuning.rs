//! Data-driven game balance
//!
//! Every physics and track constant the simulation reads comes from here.
//! Defaults mirror [`crate::consts`]; a settings file may override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Body physics ===
    /// Velocity change per tick while lift is held (upward)
    pub lift_accel: f32,
    /// Velocity change per tick otherwise (downward)
    pub gravity_accel: f32,
    /// Tilt gain: angle = -90 * gain * velocity
    pub angle_gain: f32,
    /// Tilt clamp in degrees
    pub max_tilt_degrees: f32,
    /// Ground line as a fraction of viewport height
    pub ground_ratio: f32,

    // === Body placement ===
    /// Start position as fractions of viewport width/height
    pub body_start_x_ratio: f32,
    pub body_start_y_ratio: f32,
    /// Collision radius as a fraction of viewport height
    pub body_radius_ratio: f32,

    // === Obstacle track ===
    /// Scroll speed per tick as a fraction of viewport width
    pub scroll_speed_ratio: f32,
    /// Obstacle width at spawn (pixels)
    pub obstacle_width: f32,
    /// Gap height draw range (fractions of viewport height)
    pub gap_ratio_min: f32,
    pub gap_ratio_max: f32,
    /// Lower segment height draw range (fractions of viewport height)
    pub lower_ratio_min: f32,
    pub lower_ratio_max: f32,
    /// Spawn the next obstacle once the newest crosses this fraction of width
    pub spawn_threshold_ratio: f32,
    /// Re-roll the spawn threshold after each spawn
    pub randomize_spawn_threshold: bool,
    pub spawn_threshold_min_ratio: f32,
    pub spawn_threshold_max_ratio: f32,

    // === Background ===
    /// Parallax layer scroll speeds (pixels per tick)
    pub parallax_speeds: [f32; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lift_accel: LIFT_ACCEL,
            gravity_accel: GRAVITY_ACCEL,
            angle_gain: ANGLE_GAIN,
            max_tilt_degrees: MAX_TILT_DEGREES,
            ground_ratio: GROUND_RATIO,

            body_start_x_ratio: 1.0 / 3.0,
            body_start_y_ratio: 0.25,
            body_radius_ratio: 1.0 / 32.0,

            scroll_speed_ratio: SCROLL_SPEED_RATIO,
            obstacle_width: OBSTACLE_WIDTH,
            gap_ratio_min: 0.25,
            gap_ratio_max: 0.75,
            lower_ratio_min: 0.15,
            lower_ratio_max: 0.75,
            spawn_threshold_ratio: 0.5,
            randomize_spawn_threshold: false,
            spawn_threshold_min_ratio: 0.35,
            spawn_threshold_max_ratio: 0.65,

            parallax_speeds: PARALLAX_SPEEDS,
        }
    }
}

impl Tuning {
    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> SimResult<()> {
        check_range("lift_accel", self.lift_accel, 0.0, 5.0, "[0, 5]")?;
        check_range("gravity_accel", self.gravity_accel, 0.0, 5.0, "[0, 5]")?;
        check_range("max_tilt_degrees", self.max_tilt_degrees, 0.0, 90.0, "[0, 90]")?;
        check_range("ground_ratio", self.ground_ratio, 0.1, 1.0, "[0.1, 1]")?;
        check_range("body_radius_ratio", self.body_radius_ratio, 0.0, 0.25, "[0, 0.25]")?;
        check_range("scroll_speed_ratio", self.scroll_speed_ratio, 0.0001, 0.1, "[0.0001, 0.1]")?;
        check_range("obstacle_width", self.obstacle_width, 1.0, 10_000.0, "[1, 10000]")?;
        check_range("gap_ratio_min", self.gap_ratio_min, 0.0, 1.0, "[0, 1]")?;
        check_range(
            "gap_ratio_max",
            self.gap_ratio_max,
            self.gap_ratio_min,
            1.0,
            "[gap_ratio_min, 1]",
        )?;
        check_range("lower_ratio_min", self.lower_ratio_min, 0.0, 1.0, "[0, 1]")?;
        check_range(
            "lower_ratio_max",
            self.lower_ratio_max,
            self.lower_ratio_min,
            1.0,
            "[lower_ratio_min, 1]",
        )?;
        check_range("spawn_threshold_ratio", self.spawn_threshold_ratio, 0.05, 1.0, "[0.05, 1]")?;
        check_range(
            "spawn_threshold_min_ratio",
            self.spawn_threshold_min_ratio,
            0.05,
            1.0,
            "[0.05, 1]",
        )?;
        check_range(
            "spawn_threshold_max_ratio",
            self.spawn_threshold_max_ratio,
            self.spawn_threshold_min_ratio,
            1.0,
            "[spawn_threshold_min_ratio, 1]",
        )?;
        Ok(())
    }
}

fn check_range(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
    safe_range: &'static str,
) -> SimResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range,
        })
    }
}
