//! Body vs. obstacle collision test
//!
//! The body is a circle, but the test is band-based: once the circle's
//! horizontal span overlaps the obstacle, it must sit entirely inside the
//! gap band or it collides. Rectangle corners get no special rounding, so
//! a circle grazing a corner diagonally still counts as a hit.

use glam::Vec2;

use super::state::Obstacle;

/// Check whether a circle at `center` with `radius` hits `obstacle`
pub fn collides(center: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    let left = obstacle.leading_x;
    let right = obstacle.trailing_x();

    let overlaps_horizontally = center.x + radius >= left && center.x - radius <= right;
    if !overlaps_horizontally {
        return false;
    }

    let inside_gap =
        center.y - radius >= obstacle.gap_top() && center.y + radius <= obstacle.gap_bottom();
    !inside_gap
}

/// True if the circle hits any obstacle in `obstacles`
pub fn collides_any<'a>(
    center: Vec2,
    radius: f32,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> bool {
    obstacles.into_iter().any(|o| collides(center, radius, o))
}
