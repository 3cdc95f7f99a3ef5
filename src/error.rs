//! Error types for the simulation core and its persistence helpers.
//!
//! The core itself has almost no failure surface: collisions, ground impact
//! and obstacle retirement are ordinary state transitions. What remains are
//! configuration problems (degenerate viewports, unsafe tuning) and file I/O
//! for settings and high scores.

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum SimError {
    /// A viewport with a zero dimension was supplied. Fatal: geometry can't
    /// be generated or rescaled against it.
    InvalidViewport {
        width: u32,
        height: u32,
    },

    /// A tuning constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// Reading or writing a settings/high-score file failed.
    Io(std::io::Error),

    /// A settings/high-score file did not contain valid JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport {}x{}: both dimensions must be non-zero", width, height)
            }
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "tuning constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::Io(e) => write!(f, "i/o error: {}", e),
            SimError::Parse(e) => write!(f, "malformed json: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
