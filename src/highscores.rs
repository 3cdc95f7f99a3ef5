//! High score table
//!
//! Fed from the score recording handoff: when a run ends the caller passes
//! the final score here. Kept as a JSON file holding at most
//! [`MAX_HIGH_SCORES`] entries, best first.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    /// Obstacles cleared
    pub score: u64,
    /// Run length in ticks
    pub ticks: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Best runs, highest score first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot `score` would take (0-based), or None if it doesn't make the table.
    ///
    /// Ties go behind runs already recorded. A run that cleared nothing is
    /// never recorded.
    pub fn slot_for(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Record a finished run. Returns its 1-based rank if it made the table.
    pub fn add_score(
        &mut self,
        name: &str,
        score: u64,
        ticks: u64,
        timestamp: f64,
    ) -> Option<usize> {
        let slot = self.slot_for(score)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                name: name.to_string(),
                score,
                ticks,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("High score {} by {} at rank {}", score, name, slot + 1);
        Some(slot + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the table from `path`; a missing file is an empty table
    pub fn load(path: &Path) -> SimResult<Self> {
        if !path.exists() {
            log::info!("No high scores at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)?;
        let mut scores: HighScores = serde_json::from_str(&json)?;
        // Stable sort keeps hand-edited ties in file order
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Current time as a Unix timestamp in milliseconds
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
