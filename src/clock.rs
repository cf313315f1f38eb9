//! Frame timing for the browser animation-frame loop
//!
//! Timestamps come from the host (`performance.now()` on the web) as
//! milliseconds in an `f64`. The clock turns them into per-frame deltas and
//! owns the run/pause bookkeeping the frame chain needs.

/// Converts host frame timestamps into per-frame deltas.
///
/// Each started run gets a fresh epoch. Frame callbacks scheduled before a
/// restart still carry the old epoch; the caller drops any callback whose
/// epoch no longer matches [`FrameClock::epoch`].
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    running: bool,
    paused: bool,
    last_timestamp: f64,
    epoch: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run at `now`, invalidating callbacks from earlier runs.
    pub fn start(&mut self, now: f64) {
        self.running = true;
        self.paused = false;
        self.last_timestamp = now;
        self.epoch += 1;
    }

    /// Stop producing deltas. Frames after this return `None`.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume at `now`; the pause gap never reaches a delta.
    pub fn resume(&mut self, now: f64) {
        self.paused = false;
        self.last_timestamp = now;
    }

    /// Account for one frame callback at `now`.
    ///
    /// Returns `None` when the clock is stopped, `Some(0.0)` while paused
    /// (the baseline keeps following the host so resuming is seamless), and
    /// the elapsed milliseconds otherwise. Host clocks that step backwards
    /// clamp to zero rather than rewinding the simulation.
    pub fn frame(&mut self, now: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        if self.paused {
            self.last_timestamp = now;
            return Some(0.0);
        }
        let delta = (now - self.last_timestamp).max(0.0);
        self.last_timestamp = now;
        Some(delta)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
