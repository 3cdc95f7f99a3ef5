//! Vertical body integration: lift, gravity, tilt and ground impact

use super::state::{Body, Viewport};
use crate::clamp_tilt;
use crate::tuning::Tuning;

/// Advance the body by one tick.
///
/// Lift only accelerates a living body; a dead one falls under gravity
/// until it reaches the ground line, where it stays. Returns true on the
/// tick the body first hits the ground.
pub fn integrate(body: &mut Body, lift: bool, viewport: &Viewport, tuning: &Tuning) -> bool {
    let was_alive = body.alive;

    if body.alive && lift {
        body.vel_y -= tuning.lift_accel;
    } else {
        body.vel_y += tuning.gravity_accel;
    }

    if lift || !body.alive {
        body.frame = body.frame.wrapping_add(1);
    }

    body.pos.y += body.vel_y;

    // Tilt freezes at the moment of death
    if body.alive {
        body.tilt = clamp_tilt(-90.0 * tuning.angle_gain * body.vel_y, tuning.max_tilt_degrees);
    }

    let ground = viewport.ground_y(tuning);
    if body.pos.y > ground {
        body.pos.y = ground;
        body.vel_y = 0.0;
        body.alive = false;
    }

    was_alive && !body.alive
}
