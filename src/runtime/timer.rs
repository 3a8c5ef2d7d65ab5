//! # Frame Timing
//!
//! `FrameClock` paces the animation against absolute deadlines: each tick
//! sleeps only for what is left of the current period, so drawing time does
//! not accumulate as drift. A frame that overruns by more than a whole period
//! resynchronizes the clock to "now" rather than bursting to catch up.

use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use super::signal::CancelToken;

/// Slice used when sleeping so cancellation is noticed promptly.
const HOLD_SLICE: Duration = Duration::from_millis(50);

pub struct FrameClock {
    period: Duration,
    deadline: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    pub fn starting_at(fps: u32, start: Instant) -> Self {
        let period = Duration::from_secs(1) / fps.max(1);
        Self {
            period,
            deadline: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance one frame as of `now`, returning how long to sleep.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let sleep = self.deadline.saturating_duration_since(now);
        let late = now.saturating_duration_since(self.deadline);
        if late > self.period {
            debug!("frame overran by {:?}, resyncing", late);
            self.deadline = now;
        }
        self.deadline += self.period;
        sleep
    }

    pub fn wait(&mut self) {
        let sleep = self.tick_at(Instant::now());
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
    }
}

/// Keep the current image on screen for `duration`, or until cancelled.
pub fn hold(duration: Duration, cancel: &CancelToken) {
    let end = Instant::now() + duration;
    while !cancel.is_cancelled() {
        let left = end.saturating_duration_since(Instant::now());
        if left.is_zero() {
            break;
        }
        thread::sleep(left.min(HOLD_SLICE));
    }
}
