// Animated counter - ease-out state machine stepped once per display frame
use serde::Serialize;

pub const DEFAULT_DURATION_MS: u64 = 2000;

/// Exponential ease-out: fast at first, decelerating towards 1.
pub fn ease_out_expo(progress: f64) -> f64 {
    if progress >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterFrame {
    pub value: u64,
    pub done: bool,
}

/// Counts from 0 up to `end` over `duration_ms`. A new target gets a new
/// counter, so nothing carries over from a previous run.
///
/// The first call to [`AnimatedCounter::step`] fixes the start time; every
/// later call computes progress against it. Once progress reaches 1 the
/// counter is terminal and keeps reporting `end`.
#[derive(Debug, Clone)]
pub struct AnimatedCounter {
    end: u64,
    duration_ms: u64,
    start_time: Option<f64>,
    progress: f64,
    value: u64,
}

impl AnimatedCounter {
    pub fn new(end: u64, duration_ms: u64) -> Self {
        Self {
            end,
            duration_ms,
            start_time: None,
            progress: 0.0,
            value: 0,
        }
    }

    pub fn with_default_duration(end: u64) -> Self {
        Self::new(end, DEFAULT_DURATION_MS)
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance to `now_ms` (any monotonic millisecond clock).
    pub fn step(&mut self, now_ms: f64) -> CounterFrame {
        if self.is_done() {
            return self.frame();
        }

        let start = *self.start_time.get_or_insert(now_ms);
        self.progress = if self.end == 0 || self.duration_ms == 0 {
            1.0
        } else {
            ((now_ms - start) / self.duration_ms as f64).clamp(0.0, 1.0)
        };

        let value = if self.is_done() {
            self.end
        } else {
            (ease_out_expo(self.progress) * self.end as f64).floor() as u64
        };
        // A clock that steps backwards must not make the display count down.
        self.value = value.max(self.value).min(self.end);

        self.frame()
    }

    fn frame(&self) -> CounterFrame {
        CounterFrame {
            value: self.value,
            done: self.is_done(),
        }
    }
}
