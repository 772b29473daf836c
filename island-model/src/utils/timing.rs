use crate::utils::Float;
use std::time::{Duration, Instant};

/// Implements performance timer functionality.
#[derive(Clone, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts a new timer.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Returns elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Returns elapsed time in seconds as float.
    pub fn elapsed_secs_as_float(&self) -> Float {
        self.elapsed().as_secs_f64() as Float
    }

    /// Returns true if at least given duration has passed since the timer start.
    pub fn is_elapsed(&self, duration: Duration) -> bool {
        self.elapsed() >= duration
    }

    /// Runs the action and measures its duration.
    pub fn measure_duration<R, F: FnOnce() -> R>(action: F) -> (R, Duration) {
        let start = Timer::start();
        let result = action();

        (result, start.elapsed())
    }
}
