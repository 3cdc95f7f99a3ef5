//! Proportional rescaling of world geometry on display-mode changes

use super::state::{GameEvent, GameWorld, Viewport};
use crate::error::{SimError, SimResult};

/// Per-axis scale factors between two viewports
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportScaler {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ViewportScaler {
    /// Factors mapping `old` onto `new`
    pub fn between(old: &Viewport, new: &Viewport) -> SimResult<Self> {
        Self::from_dimensions(old.width, old.height, new.width, new.height)
    }

    pub fn from_dimensions(
        old_width: u32,
        old_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> SimResult<Self> {
        if old_width == 0 || old_height == 0 {
            return Err(SimError::InvalidViewport {
                width: old_width,
                height: old_height,
            });
        }
        if new_width == 0 || new_height == 0 {
            return Err(SimError::InvalidViewport {
                width: new_width,
                height: new_height,
            });
        }
        Ok(Self {
            scale_x: new_width as f32 / old_width as f32,
            scale_y: new_height as f32 / old_height as f32,
        })
    }

    /// Rescale body, background offsets and every live obstacle.
    ///
    /// Velocity is left alone; only positions and sizes scale.
    pub fn apply(&self, world: &mut GameWorld) {
        let body = &mut world.body;
        body.pos.x *= self.scale_x;
        body.pos.y *= self.scale_y;
        body.radius *= self.scale_y;

        for offset in world.background.iter_mut() {
            *offset *= self.scale_x;
        }

        for obstacle in world.track.iter_mut() {
            obstacle.leading_x *= self.scale_x;
            obstacle.width *= self.scale_x;
            obstacle.upper_height *= self.scale_y;
            obstacle.gap_height *= self.scale_y;
            obstacle.lower_height *= self.scale_y;
        }
        world.track.scale_spawn_threshold(self.scale_x);
    }
}

impl GameWorld {
    /// Switch to `new` viewport dimensions and rescale all geometry.
    ///
    /// Must run before the next tick reads geometry.
    pub fn resize_viewport(&mut self, new: Viewport) -> SimResult<()> {
        let scaler = ViewportScaler::between(&self.viewport, &new)?;
        scaler.apply(self);
        self.viewport = new;

        log::debug!(
            "Viewport -> {}x{} (fullscreen: {}), scale {:.3}x{:.3}",
            new.width,
            new.height,
            new.fullscreen,
            scaler.scale_x,
            scaler.scale_y
        );
        self.events.push(GameEvent::ViewportRescaled {
            width: new.width,
            height: new.height,
        });
        Ok(())
    }

    /// Flip fullscreen on/off; the platform supplies the resulting size
    pub fn toggle_display(&mut self, width: u32, height: u32) -> SimResult<()> {
        let new = Viewport::new(width, height, !self.viewport.fullscreen)?;
        self.resize_viewport(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn world() -> GameWorld {
        let viewport = Viewport::new(800, 450, false).unwrap();
        GameWorld::new(42, viewport, Tuning::default()).unwrap()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-3 * a.abs().max(1.0)
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        assert!(ViewportScaler::from_dimensions(0, 450, 800, 450).is_err());
        assert!(ViewportScaler::from_dimensions(800, 450, 1920, 0).is_err());
        let mut world = world();
        assert!(world.toggle_display(0, 1080).is_err());
        // Failed toggle leaves the viewport untouched
        assert_eq!(world.viewport.width, 800);
        assert!(!world.viewport.fullscreen);
    }

    #[test]
    fn test_scales_all_geometry() {
        let mut world = world();
        world.background = [-10.0, -20.0, -30.0];
        let before_body = world.body.pos;
        let before = *world.track.oldest().unwrap();

        world.toggle_display(1600, 900).unwrap();

        assert!(world.viewport.fullscreen);
        assert_eq!(world.viewport.width, 1600);
        assert!(approx(world.body.pos.x, before_body.x * 2.0));
        assert!(approx(world.body.pos.y, before_body.y * 2.0));
        assert_eq!(world.background, [-20.0, -40.0, -60.0]);

        let after = world.track.oldest().unwrap();
        assert_eq!(after.leading_x, before.leading_x * 2.0);
        assert_eq!(after.width, before.width * 2.0);
        assert_eq!(after.upper_height, before.upper_height * 2.0);
        assert_eq!(after.gap_height, before.gap_height * 2.0);
        assert_eq!(after.lower_height, before.lower_height * 2.0);
        assert_eq!(world.track.next_spawn_at(), 800.0);
        // Segments still span the new viewport
        assert_eq!(after.upper_height + after.gap_height + after.lower_height, 900.0);

        assert!(world.events.contains(&GameEvent::ViewportRescaled {
            width: 1600,
            height: 900
        }));
    }

    #[test]
    fn test_round_trip_restores_geometry() {
        let mut world = world();
        world.background = [-3.5, -7.0, -21.0];
        world.body.pos.y = 201.3;
        let body = world.body.clone();
        let obstacles: Vec<_> = world.track.iter().copied().collect();

        world.toggle_display(1920, 1080).unwrap();
        world.toggle_display(800, 450).unwrap();

        assert!(!world.viewport.fullscreen);
        assert!(approx(world.body.pos.x, body.pos.x));
        assert!(approx(world.body.pos.y, body.pos.y));
        assert!(approx(world.body.radius, body.radius));
        assert!(approx(world.background[2], -21.0));
        for (a, b) in world.track.iter().zip(obstacles.iter()) {
            assert!(approx(a.leading_x, b.leading_x));
            assert!(approx(a.width, b.width));
            assert!(approx(a.upper_height, b.upper_height));
            assert!(approx(a.gap_height, b.gap_height));
            assert!(approx(a.lower_height, b.lower_height));
        }
        assert!(approx(world.track.next_spawn_at(), 400.0));
    }

    #[test]
    fn test_non_uniform_scale() {
        let scaler = ViewportScaler::from_dimensions(800, 450, 1280, 1024).unwrap();
        assert_eq!(scaler.scale_x, 1.6);
        assert!(approx(scaler.scale_y, 1024.0 / 450.0));
    }
}
