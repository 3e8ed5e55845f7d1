use std::time::Instant;

/// Animation time per frame: one 60 Hz frame in milliseconds
pub const DEFAULT_TIME_STEP: f32 = 1000.0 / 60.0;

/// Fixed-step animation time
///
/// Advances by the same amount every frame regardless of how long the frame
/// took, so a slow frame slows the animation instead of skipping it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAccumulator {
    time: f32,
    step: f32,
}

impl TimeAccumulator {
    /// Non-finite, zero or negative steps fall back to the default
    pub fn new(step: f32) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_TIME_STEP
        };
        Self { time: 0.0, step }
    }

    /// Adds one step and returns the new time
    pub fn advance(&mut self) -> f32 {
        self.time += self.step;
        self.time
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Default for TimeAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

/// Minimal wall clock - just tracks delta time
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
