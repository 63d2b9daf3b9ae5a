use std::time::Duration;

/// Minimum delay between reconnect attempts (seconds).
const BACKOFF_BASE_SECS: u64 = 5;
/// Maximum delay between reconnect attempts (seconds).
const BACKOFF_MAX_SECS: u64 = 300; // 5 minutes
/// Jitter fraction applied to each delay (+10 %).
const JITTER_FRACTION: f64 = 0.10;

/// Exponential reconnect delay with jitter, shared by the platform adapters.
///
/// Schedule: 5 s → 10 s → 20 s → … → 300 s (cap). Call [`Backoff::reset`]
/// after a successful connection so the next failure starts from the base again.
#[derive(Debug, Clone)]
pub struct Backoff {
    base_secs: u64,
    max_secs: u64,
    current_secs: u64,
    attempts: u32,
}

impl Backoff {
    pub fn new() -> Self {
        Self::with_bounds(BACKOFF_BASE_SECS, BACKOFF_MAX_SECS)
    }

    pub fn with_bounds(base_secs: u64, max_secs: u64) -> Self {
        let base_secs = base_secs.max(1);
        Self {
            base_secs,
            max_secs: max_secs.max(base_secs),
            current_secs: base_secs,
            attempts: 0,
        }
    }

    /// Delay to wait before the next attempt, then advance the schedule.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current_secs;
        self.current_secs = (self.current_secs * 2).min(self.max_secs);
        self.attempts += 1;
        Duration::from_secs(delay + jitter_secs(delay))
    }

    /// Number of delays handed out since the last reset.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.current_secs = self.base_secs;
        self.attempts = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

/// Return a jitter offset (0 … `JITTER_FRACTION * base_secs`) as integer seconds.
///
/// Derived from the sub-second part of the wall clock to avoid a rand dependency.
fn jitter_secs(base_secs: u64) -> u64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);

    let max_jitter = ((base_secs as f64) * JITTER_FRACTION) as u64;
    if max_jitter == 0 {
        return 0;
    }
    (nanos as u64) % max_jitter
}
