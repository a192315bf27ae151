//! Ticking capability driving the elapsed-time counter.
//!
//! The engine owns a `Ticker` and decides when it runs; the scheduler behind it
//! (a browser interval, or a test harness) calls `RoundEngine::tick` each period.

use crate::error::GameError;

pub trait Ticker {
    /// Begin calling back every `interval_ms`. On error no timer is running.
    fn start(&mut self, interval_ms: u64) -> Result<(), GameError>;
    fn stop(&mut self);
}

/// Ticker with no scheduler behind it; the caller drives `tick()` by hand.
/// Records calls so tests can check start/stop ordering.
#[derive(Debug, Default)]
pub struct ManualTicker {
    pub running: bool,
    pub starts: u32,
    pub stops: u32,
    /// Set if `start` was ever called while already running.
    pub overlapped: bool,
}

impl Ticker for ManualTicker {
    fn start(&mut self, _interval_ms: u64) -> Result<(), GameError> {
        if self.running {
            self.overlapped = true;
        }
        self.running = true;
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }
}
