//! Fixed timestep simulation tick
//!
//! One call advances the session by one display refresh: input actions are
//! dispatched through the session mode table first, then (in active play)
//! physics, the obstacle track and collision run in that order. A display
//! toggle is applied last so the next tick sees rescaled geometry.

use super::collision::collides_any;
use super::physics::integrate;
use super::state::{GameEvent, GameWorld, SessionMode};
use crate::error::SimResult;

/// Input actions for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lift key currently held
    pub lift: bool,
    /// Menu: start a new run
    pub start: bool,
    /// Active play: pause/escape
    pub pause: bool,
    /// Active play: acknowledge game over
    pub confirm: bool,
    /// Active play: re-initialize the run in place
    pub restart: bool,
    /// Score recording: close and return to the menu
    pub close: bool,
    /// Terminate the tick loop
    pub quit: bool,
    /// Toggle fullscreen; the platform supplies the resulting size
    pub display_toggle: Option<(u32, u32)>,
    /// Demo mode - the autopilot flies
    pub autopilot: bool,
}

/// Advance the world by one tick
pub fn tick(world: &mut GameWorld, input: &TickInput) -> SimResult<()> {
    if !world.running {
        return Ok(());
    }

    let transitioned = dispatch(world, input)?;

    if !transitioned && world.mode == SessionMode::ActivePlay {
        step_active(world, input)?;
    }

    if let Some((width, height)) = input.display_toggle {
        world.toggle_display(width, height)?;
    }

    Ok(())
}

/// Apply session mode transitions. Returns true if the mode changed or the
/// run was restarted, in which case the simulation step is skipped.
fn dispatch(world: &mut GameWorld, input: &TickInput) -> SimResult<bool> {
    if input.quit {
        log::info!("Quit requested from {:?}", world.mode);
        world.running = false;
        world.events.push(GameEvent::Quit);
        return Ok(true);
    }

    match world.mode {
        SessionMode::Menu => {
            if input.start {
                enter_active_play(world)?;
                return Ok(true);
            }
        }
        SessionMode::ActivePlay => {
            if input.restart {
                log::info!("Run restarted at score {}", world.score());
                enter_active_play(world)?;
                return Ok(true);
            }
            if world.body.alive {
                if input.pause {
                    world.events.push(GameEvent::LiftSoundStopped);
                    enter_menu(world);
                    return Ok(true);
                }
            } else if input.pause || input.confirm {
                enter_score_recording(world);
                return Ok(true);
            }
        }
        SessionMode::ScoreRecording => {
            if input.close {
                enter_menu(world);
                return Ok(true);
            }
        }
    }

    Ok(false)
}

fn enter_active_play(world: &mut GameWorld) -> SimResult<()> {
    world.reset_session()?;
    world.mode = SessionMode::ActivePlay;
    world.events.push(GameEvent::EnteredActivePlay);
    world.events.push(GameEvent::LiftSoundStarted);
    log::info!("Run started");
    Ok(())
}

fn enter_menu(world: &mut GameWorld) {
    world.mode = SessionMode::Menu;
    world.events.push(GameEvent::EnteredMenu);
    log::info!("Entered menu");
}

fn enter_score_recording(world: &mut GameWorld) {
    let score = world.score();
    world.mode = SessionMode::ScoreRecording;
    world.events.push(GameEvent::EnteredScoreRecording { score });
    log::info!("Run over after {} ticks, score {}", world.time_ticks, score);
}

/// Physics, obstacle track and collision for one active-play tick
fn step_active(world: &mut GameWorld, input: &TickInput) -> SimResult<()> {
    world.time_ticks += 1;

    let lift = if input.autopilot {
        autopilot_lift(world)
    } else {
        input.lift
    };
    world.body.lift = lift;

    if integrate(&mut world.body, lift, &world.viewport, &world.tuning) {
        log::debug!("Ground impact at tick {}", world.time_ticks);
        world.record_impact();
    }

    if world.body.alive {
        for (offset, speed) in world.background.iter_mut().zip(world.tuning.parallax_speeds) {
            *offset -= speed;
        }
        world.track.advance(world.viewport.scroll_speed(&world.tuning));
    }

    world.track.maybe_spawn(&world.viewport, &world.tuning, &mut world.rng)?;
    if world.track.maybe_retire_oldest() {
        world.events.push(GameEvent::ObstacleRetired {
            score: world.track.score(),
        });
    }

    if collides_any(world.body.pos, world.body.radius, world.track.iter()) {
        world.kill_body();
    }

    Ok(())
}

/// Demo-mode lift decision: steer toward the gap centre of the nearest
/// obstacle the body hasn't cleared yet, leading by the current velocity.
fn autopilot_lift(world: &GameWorld) -> bool {
    let body = &world.body;
    let target = world
        .track
        .iter()
        .find(|o| o.trailing_x() >= body.pos.x - body.radius)
        .map(|o| o.gap_center())
        .unwrap_or(world.viewport.height_f() * 0.5);

    let predicted = body.pos.y + body.vel_y * 8.0;
    predicted > target
}
