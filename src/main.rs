//! Flappy Chicken entry point
//!
//! Runs the simulation headless: a scripted director walks the session
//! through menu, autopilot play and score recording, toggling the display
//! mode along the way. Audio cues are logged instead of played.
//!
//! Usage: flappy-chicken [--seed N] [--runs N] [--max-ticks N] [--realtime]
//!                       [--settings PATH] [--scores PATH] [--name NAME]

use std::path::PathBuf;
use std::process::ExitCode;

use flappy_chicken::audio::{AudioManager, LogBackend};
use flappy_chicken::consts::TICK_RATE;
use flappy_chicken::highscores::{HighScores, now_millis};
use flappy_chicken::platform::{FixedTicker, TickRateMeter};
use flappy_chicken::sim::{GameEvent, GameWorld, SessionMode, TickInput, tick};
use flappy_chicken::{Settings, SimError};

/// Command line options
#[derive(Debug)]
struct Options {
    seed: Option<u64>,
    runs: u32,
    max_ticks: u64,
    realtime: bool,
    settings_path: PathBuf,
    scores_path: PathBuf,
    name: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: None,
            runs: 3,
            max_ticks: 60 * TICK_RATE as u64,
            realtime: false,
            settings_path: PathBuf::from("settings.json"),
            scores_path: PathBuf::from("highscores.json"),
            name: "autopilot".to_string(),
        }
    }
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            let mut value =
                |flag: &str| args.next().ok_or_else(|| format!("{} needs a value", flag));
            match arg.as_str() {
                "--seed" => options.seed = Some(parse_number(&value("--seed")?)?),
                "--runs" => options.runs = parse_number(&value("--runs")?)?,
                "--max-ticks" => options.max_ticks = parse_number(&value("--max-ticks")?)?,
                "--realtime" => options.realtime = true,
                "--settings" => options.settings_path = PathBuf::from(value("--settings")?),
                "--scores" => options.scores_path = PathBuf::from(value("--scores")?),
                "--name" => options.name = value("--name")?,
                other => return Err(format!("unknown argument '{}'", other)),
            }
        }
        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, String> {
    s.parse().map_err(|_| format!("'{}' is not a valid number", s))
}

/// Scripted stand-in for a player sitting at the keyboard
struct Director {
    runs_left: u32,
    max_ticks: u64,
    /// Ticks spent looking at the game-over screen
    dead_ticks: u32,
    /// Display toggles performed so far in the current run
    toggles_done: u32,
}

impl Director {
    /// Ticks to linger on the game-over screen before confirming
    const GAME_OVER_DELAY: u32 = 90;
    /// Active-play ticks at which the display mode flips
    const TOGGLE_AT: [u64; 2] = [300, 600];

    fn new(runs: u32, max_ticks: u64) -> Self {
        Self {
            runs_left: runs,
            max_ticks,
            dead_ticks: 0,
            toggles_done: 0,
        }
    }

    fn next_input(&mut self, world: &GameWorld, settings: &Settings) -> TickInput {
        match world.mode {
            SessionMode::Menu => {
                if self.runs_left == 0 {
                    return TickInput {
                        quit: true,
                        ..Default::default()
                    };
                }
                self.runs_left -= 1;
                self.dead_ticks = 0;
                self.toggles_done = 0;
                TickInput {
                    start: true,
                    ..Default::default()
                }
            }
            SessionMode::ActivePlay => {
                if !world.body.alive {
                    self.dead_ticks += 1;
                    return TickInput {
                        confirm: self.dead_ticks >= Self::GAME_OVER_DELAY,
                        ..Default::default()
                    };
                }
                if world.time_ticks >= self.max_ticks {
                    log::info!("Run hit the {} tick limit, pausing out", self.max_ticks);
                    return TickInput {
                        pause: true,
                        ..Default::default()
                    };
                }
                let mut input = TickInput {
                    autopilot: true,
                    ..Default::default()
                };
                let pending = Self::TOGGLE_AT.get(self.toggles_done as usize);
                if pending.is_some_and(|at| world.time_ticks >= *at) {
                    self.toggles_done += 1;
                    input.display_toggle = Some(settings.toggled_size(&world.viewport));
                }
                input
            }
            SessionMode::ScoreRecording => TickInput {
                close: true,
                ..Default::default()
            },
        }
    }
}

fn run(options: Options) -> Result<(), SimError> {
    let settings = Settings::load_or_default(&options.settings_path);
    let seed = options.seed.unwrap_or_else(|| now_millis() as u64);
    let mut world = GameWorld::new(seed, settings.initial_viewport()?, settings.tuning.clone())?;

    let mut audio = AudioManager::with_settings(LogBackend::default(), &settings);
    let mut highscores = HighScores::load(&options.scores_path).unwrap_or_else(|e| {
        log::warn!("Ignoring high scores at {}: {}", options.scores_path.display(), e);
        HighScores::new()
    });

    let mut director = Director::new(options.runs, options.max_ticks);
    let mut ticker = FixedTicker::new(TICK_RATE);
    let mut meter = TickRateMeter::new();
    let mut total_ticks: u64 = 0;

    while world.running {
        let input = director.next_input(&world, &settings);
        tick(&mut world, &input)?;
        total_ticks += 1;

        for event in world.drain_events() {
            audio.handle_event(&event);
            match event {
                GameEvent::EnteredScoreRecording { score } => {
                    let rank =
                        highscores.add_score(&options.name, score, world.time_ticks, now_millis());
                    match rank {
                        Some(rank) => log::info!("Score {} recorded at rank {}", score, rank),
                        None => log::info!("Score {} did not make the table", score),
                    }
                }
                GameEvent::ViewportRescaled { width, height } => {
                    log::info!("Display is now {}x{}", width, height);
                }
                _ => {}
            }
        }

        let now = if options.realtime {
            ticker.wait()
        } else {
            total_ticks as f64 / TICK_RATE as f64
        };
        meter.record(now);

        if settings.show_fps && total_ticks % (10 * TICK_RATE as u64) == 0 {
            log::info!(
                "{:.1} ticks/s, mode {:?}, score {}",
                meter.rate(),
                world.mode,
                world.score()
            );
        }
    }

    if let Some(top) = highscores.top_score() {
        log::info!("Best score so far: {}", top);
    }
    highscores.save(&options.scores_path)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            log::error!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Flappy Chicken starting...");
    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
