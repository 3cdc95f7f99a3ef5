//! Procedural obstacle generation and the scrolling obstacle track

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Viewport};
use crate::error::{SimError, SimResult};
use crate::tuning::Tuning;

/// Draws random obstacle shapes for a viewport
#[derive(Debug, Clone, Copy)]
pub struct ObstacleGenerator {
    pub width: f32,
    pub gap_ratio: (f32, f32),
    pub lower_ratio: (f32, f32),
}

impl ObstacleGenerator {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.obstacle_width,
            gap_ratio: (tuning.gap_ratio_min, tuning.gap_ratio_max),
            lower_ratio: (tuning.lower_ratio_min, tuning.lower_ratio_max),
        }
    }

    /// Generate an obstacle entering at the right edge.
    ///
    /// Heights are drawn at whole-pixel resolution. If the gap and lower
    /// segment together overrun the viewport, the upper segment is clamped
    /// to zero and the gap shrinks to fit, so the three heights always sum
    /// to `viewport_height`.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        viewport_width: u32,
        viewport_height: u32,
    ) -> SimResult<Obstacle> {
        if viewport_width == 0 || viewport_height == 0 {
            return Err(SimError::InvalidViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }

        let h = viewport_height as f32;
        let gap_height = draw_pixels(rng, h, self.gap_ratio);
        let lower_height = draw_pixels(rng, h, self.lower_ratio);

        let (upper_height, gap_height) = if lower_height + gap_height > h {
            (0.0, h - lower_height)
        } else {
            (h - lower_height - gap_height, gap_height)
        };

        Ok(Obstacle {
            leading_x: viewport_width as f32,
            width: self.width,
            upper_height,
            lower_height,
            gap_height,
        })
    }
}

/// Uniform whole-pixel draw from `[min * extent, max * extent]`
fn draw_pixels<R: Rng>(rng: &mut R, extent: f32, (min, max): (f32, f32)) -> f32 {
    let lo = (extent * min) as u32;
    let hi = ((extent * max) as u32).max(lo);
    rng.random_range(lo..=hi) as f32
}

/// Oldest-first queue of live obstacles, plus the score they have earned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleTrack {
    obstacles: VecDeque<Obstacle>,
    score: u64,
    /// Spawn once the newest obstacle's leading edge drops below this x
    next_spawn_at: f32,
}

impl ObstacleTrack {
    /// A fresh track with a single obstacle at the right edge and zero score
    pub fn new<R: Rng>(viewport: &Viewport, tuning: &Tuning, rng: &mut R) -> SimResult<Self> {
        let first = ObstacleGenerator::from_tuning(tuning).generate(
            rng,
            viewport.width,
            viewport.height,
        )?;
        let mut obstacles = VecDeque::with_capacity(4);
        obstacles.push_back(first);
        Ok(Self {
            obstacles,
            score: 0,
            next_spawn_at: viewport.width_f() * tuning.spawn_threshold_ratio,
        })
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Obstacles oldest (leftmost) first
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn oldest(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn newest(&self) -> Option<&Obstacle> {
        self.obstacles.back()
    }

    /// Current spawn threshold (x coordinate)
    #[inline]
    pub fn next_spawn_at(&self) -> f32 {
        self.next_spawn_at
    }

    /// Scale the spawn threshold along with the rest of the horizontal geometry
    pub(crate) fn scale_spawn_threshold(&mut self, scale_x: f32) {
        self.next_spawn_at *= scale_x;
    }

    /// Scroll every obstacle left by `scroll_speed`
    pub fn advance(&mut self, scroll_speed: f32) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.advance(scroll_speed);
        }
    }

    /// Append a new obstacle once the newest has crossed the spawn threshold.
    ///
    /// Returns true if one was spawned.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        viewport: &Viewport,
        tuning: &Tuning,
        rng: &mut R,
    ) -> SimResult<bool> {
        let due = match self.obstacles.back() {
            Some(newest) => newest.leading_x < self.next_spawn_at,
            None => true,
        };
        if !due {
            return Ok(false);
        }

        let obstacle = ObstacleGenerator::from_tuning(tuning).generate(
            rng,
            viewport.width,
            viewport.height,
        )?;
        self.obstacles.push_back(obstacle);

        if tuning.randomize_spawn_threshold {
            let lo = (viewport.width_f() * tuning.spawn_threshold_min_ratio) as u32;
            let hi = ((viewport.width_f() * tuning.spawn_threshold_max_ratio) as u32).max(lo);
            self.next_spawn_at = rng.random_range(lo..=hi) as f32;
        }

        log::debug!(
            "Spawned obstacle: gap {:.0}..{:.0}, track length {}",
            obstacle.gap_top(),
            obstacle.gap_bottom(),
            self.obstacles.len()
        );
        Ok(true)
    }

    /// Remove the oldest obstacle once it is fully off-screen, scoring one point.
    ///
    /// Returns true if one was retired.
    pub fn maybe_retire_oldest(&mut self) -> bool {
        let off_screen = self.obstacles.front().is_some_and(|o| !o.is_visible());
        if !off_screen {
            return false;
        }
        self.obstacles.pop_front();
        self.score += 1;
        log::debug!("Obstacle retired, score {}", self.score);
        true
    }
}
