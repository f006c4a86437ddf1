use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

/// Sliding-window execution counter
///
/// Every attempt is recorded, including the ones that end up blocked.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    timestamps: VecDeque<DateTime<Utc>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            timestamps: VecDeque::new(),
            limit,
            window,
        }
    }

    /// Record an attempt at `now`; `false` when it exceeds the limit
    pub fn admit(&mut self, now: DateTime<Utc>) -> bool {
        self.timestamps.push_back(now);
        while let Some(oldest) = self.timestamps.front() {
            if now - *oldest > self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
        self.timestamps.len() <= self.limit
    }

    /// Attempts currently inside the window
    pub fn in_window(&self) -> usize {
        self.timestamps.len()
    }
}
