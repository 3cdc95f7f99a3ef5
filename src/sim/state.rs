//! Game state and core simulation types
//!
//! All state the tick loop owns lives in [`GameWorld`]; renderers and audio
//! read it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleTrack;
use crate::error::{SimError, SimResult};
use crate::tuning::Tuning;

/// Which part of the game currently owns input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionMode {
    /// Main menu (start / quit)
    #[default]
    Menu,
    /// Flying through the obstacle track
    ActivePlay,
    /// Run ended, final score handed to the high score table
    ScoreRecording,
}

/// Discrete notifications for audio and score-recording collaborators.
///
/// Collected during a tick and drained by the caller afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Flying loop should start playing
    LiftSoundStarted,
    /// Flying loop should stop
    LiftSoundStopped,
    /// Body hit an obstacle or the ground
    Impact,
    /// A run started or restarted; gameplay music should play
    EnteredActivePlay,
    /// Back at the main menu
    EnteredMenu,
    /// Run over; hand `score` to the high score table
    EnteredScoreRecording { score: u64 },
    /// An obstacle left the screen and scored
    ObstacleRetired { score: u64 },
    /// Display mode toggled and geometry was rescaled
    ViewportRescaled { width: u32, height: u32 },
    /// Tick loop should terminate
    Quit,
}

/// Display surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl Viewport {
    /// Create a viewport, rejecting zero dimensions
    pub fn new(width: u32, height: u32, fullscreen: bool) -> SimResult<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidViewport { width, height });
        }
        Ok(Self {
            width,
            height,
            fullscreen,
        })
    }

    #[inline]
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self, tuning: &Tuning) -> f32 {
        self.height_f() * tuning.ground_ratio
    }

    /// Obstacle scroll distance per tick
    #[inline]
    pub fn scroll_speed(&self, tuning: &Tuning) -> f32 {
        self.width_f() * tuning.scroll_speed_ratio
    }
}

/// The player-controlled chicken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Center position; `x` stays fixed for the whole session
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive = down)
    pub vel_y: f32,
    /// Cosmetic tilt in degrees, within the tuning's tilt clamp
    pub tilt: f32,
    pub alive: bool,
    /// Animation counter for the renderer
    pub frame: u32,
    /// Lift input as of the last tick
    pub lift: bool,
    /// Collision radius
    pub radius: f32,
}

impl Body {
    /// Fresh body at the start position for this viewport
    pub fn spawn(viewport: &Viewport, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width_f() * tuning.body_start_x_ratio,
                viewport.height_f() * tuning.body_start_y_ratio,
            ),
            vel_y: 0.0,
            tilt: 0.0,
            alive: true,
            frame: 0,
            lift: false,
            radius: viewport.height_f() * tuning.body_radius_ratio,
        }
    }
}

/// A pair of vertical segments with a gap between them.
///
/// Shape is fixed after creation; only `leading_x` moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub leading_x: f32,
    pub width: f32,
    /// Segment hanging from the top of the screen
    pub upper_height: f32,
    /// Segment standing on the bottom of the screen
    pub lower_height: f32,
    pub gap_height: f32,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_x(&self) -> f32 {
        self.leading_x + self.width
    }

    /// Top of the gap band
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.upper_height
    }

    /// Bottom of the gap band
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.upper_height + self.gap_height
    }

    /// Vertical middle of the gap band
    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.upper_height + self.gap_height / 2.0
    }

    /// False once the obstacle has fully scrolled off the left edge
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.trailing_x() >= 0.0
    }

    /// Scroll left by `distance`
    #[inline]
    pub fn advance(&mut self, distance: f32) {
        self.leading_x -= distance;
    }
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWorld {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Obstacle RNG
    pub rng: Pcg32,
    /// Balance values
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub mode: SessionMode,
    pub body: Body,
    pub track: ObstacleTrack,
    /// Parallax background offsets (far, middle, near)
    pub background: [f32; 3],
    /// Active-play ticks since the session started
    pub time_ticks: u64,
    /// False once a quit action has been processed
    pub running: bool,
    /// Events produced since the caller last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameWorld {
    /// Create a world sitting in the menu
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> SimResult<Self> {
        tuning.validate()?;
        let viewport = Viewport::new(viewport.width, viewport.height, viewport.fullscreen)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let track = ObstacleTrack::new(&viewport, &tuning, &mut rng)?;
        let body = Body::spawn(&viewport, &tuning);

        log::info!(
            "World created with seed {} ({}x{})",
            seed,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            seed,
            rng,
            tuning,
            viewport,
            mode: SessionMode::Menu,
            body,
            track,
            background: [0.0; 3],
            time_ticks: 0,
            running: true,
            events: vec![GameEvent::EnteredMenu],
        })
    }

    /// Current score
    #[inline]
    pub fn score(&self) -> u64 {
        self.track.score()
    }

    /// Re-initialize body and obstacle track for a new run
    pub fn reset_session(&mut self) -> SimResult<()> {
        self.body = Body::spawn(&self.viewport, &self.tuning);
        self.track = ObstacleTrack::new(&self.viewport, &self.tuning, &mut self.rng)?;
        self.background = [0.0; 3];
        self.time_ticks = 0;
        Ok(())
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Mark the body dead, emitting impact events the first time only
    pub fn kill_body(&mut self) {
        if self.body.alive {
            self.body.alive = false;
            self.record_impact();
        }
    }

    /// Notify collaborators that the body just died
    pub(crate) fn record_impact(&mut self) {
        self.events.push(GameEvent::LiftSoundStopped);
        self.events.push(GameEvent::Impact);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameWorld {
        let viewport = Viewport::new(800, 450, false).unwrap();
        GameWorld::new(7, viewport, Tuning::default()).unwrap()
    }

    #[test]
    fn test_viewport_rejects_zero() {
        assert!(matches!(
            Viewport::new(0, 450, false),
            Err(SimError::InvalidViewport { width: 0, height: 450 })
        ));
        assert!(Viewport::new(800, 0, true).is_err());
    }

    #[test]
    fn test_body_spawn_position() {
        let viewport = Viewport::new(800, 450, false).unwrap();
        let body = Body::spawn(&viewport, &Tuning::default());
        assert!((body.pos.x - 266.666_67).abs() < 0.01);
        assert_eq!(body.pos.y, 112.5);
        assert_eq!(body.vel_y, 0.0);
        assert!(body.alive);
    }

    #[test]
    fn test_new_world_starts_in_menu() {
        let mut world = world();
        assert_eq!(world.mode, SessionMode::Menu);
        assert_eq!(world.score(), 0);
        assert_eq!(world.track.len(), 1);
        assert_eq!(world.drain_events(), vec![GameEvent::EnteredMenu]);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_kill_body_is_idempotent() {
        let mut world = world();
        world.drain_events();
        world.kill_body();
        world.kill_body();
        assert!(!world.body.alive);
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::LiftSoundStopped, GameEvent::Impact]
        );
    }

    #[test]
    fn test_obstacle_edges() {
        let obstacle = Obstacle {
            leading_x: -50.0,
            width: 100.0,
            upper_height: 100.0,
            lower_height: 150.0,
            gap_height: 200.0,
        };
        assert_eq!(obstacle.trailing_x(), 50.0);
        assert_eq!(obstacle.gap_bottom(), 300.0);
        assert_eq!(obstacle.gap_center(), 200.0);
        assert!(obstacle.is_visible());
    }
}
