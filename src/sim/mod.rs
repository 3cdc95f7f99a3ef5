//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per display refresh)
//! - Seeded RNG only
//! - Oldest-first iteration over obstacles
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod physics;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{collides, collides_any};
pub use obstacle::{ObstacleGenerator, ObstacleTrack};
pub use physics::integrate;
pub use state::{Body, GameEvent, GameWorld, Obstacle, SessionMode, Viewport};
pub use tick::{TickInput, tick};
pub use viewport::ViewportScaler;
