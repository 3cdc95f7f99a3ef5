//! Platform layer
//!
//! Handles the parts of the tick loop that depend on wall-clock time:
//! - Pacing ticks to the target rate
//! - Measuring the achieved tick rate for the HUD

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::TICK_RATE;

/// Number of recent ticks averaged by [`TickRateMeter`]
pub const RATE_WINDOW: usize = 60;

/// Rolling tick-rate estimate over the last [`RATE_WINDOW`] ticks
#[derive(Debug, Clone)]
pub struct TickRateMeter {
    tick_times: [f64; RATE_WINDOW],
    index: usize,
    filled: usize,
}

impl Default for TickRateMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickRateMeter {
    pub fn new() -> Self {
        Self {
            tick_times: [0.0; RATE_WINDOW],
            index: 0,
            filled: 0,
        }
    }

    /// Record a tick at `time_secs`
    pub fn record(&mut self, time_secs: f64) {
        self.tick_times[self.index] = time_secs;
        self.index = (self.index + 1) % RATE_WINDOW;
        self.filled = (self.filled + 1).min(RATE_WINDOW);
    }

    /// Ticks per second, or 0 until two ticks have been seen
    pub fn rate(&self) -> f64 {
        if self.filled < 2 {
            return 0.0;
        }
        let newest = self.tick_times[(self.index + RATE_WINDOW - 1) % RATE_WINDOW];
        let oldest = if self.filled == RATE_WINDOW {
            self.tick_times[self.index]
        } else {
            self.tick_times[0]
        };
        let elapsed = newest - oldest;
        if elapsed <= 0.0 {
            return 0.0;
        }
        (self.filled - 1) as f64 / elapsed
    }
}

/// Blocks until the next tick is due, like a display's vsync
#[derive(Debug)]
pub struct FixedTicker {
    period: Duration,
    next: Instant,
    started: Instant,
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

impl FixedTicker {
    pub fn new(ticks_per_second: u32) -> Self {
        let now = Instant::now();
        Self {
            period: Duration::from_secs_f64(1.0 / ticks_per_second.max(1) as f64),
            next: now,
            started: now,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until the next tick boundary; returns seconds since start.
    ///
    /// If the loop fell behind by more than a full period the schedule is
    /// reset instead of bursting to catch up.
    pub fn wait(&mut self) -> f64 {
        self.next += self.period;
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        } else if now - self.next > self.period {
            self.next = now;
        }
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_needs_two_samples() {
        let mut meter = TickRateMeter::new();
        assert_eq!(meter.rate(), 0.0);
        meter.record(1.0);
        assert_eq!(meter.rate(), 0.0);
    }

    #[test]
    fn test_rate_partial_window() {
        let mut meter = TickRateMeter::new();
        for i in 0..11 {
            meter.record(i as f64 * 0.02);
        }
        // 10 intervals over 0.2s
        assert!((meter.rate() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_rate_full_window_wraps() {
        let mut meter = TickRateMeter::new();
        // Slow ticks first, then a full window of 60 Hz ticks
        for i in 0..10 {
            meter.record(i as f64);
        }
        let start = 100.0;
        for i in 0..RATE_WINDOW {
            meter.record(start + i as f64 / 60.0);
        }
        assert!((meter.rate() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_ticker_period() {
        let ticker = FixedTicker::new(60);
        assert!((ticker.period().as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
        let ticker = FixedTicker::new(0);
        assert_eq!(ticker.period(), Duration::from_secs(1));
    }

    #[test]
    fn test_ticker_advances_time() {
        let mut ticker = FixedTicker::new(1000);
        let a = ticker.wait();
        let b = ticker.wait();
        assert!(b >= a);
        assert!(b > 0.0);
    }
}
