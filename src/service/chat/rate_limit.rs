//! Sliding-window rate limiting for chat messages.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Default message budget per window.
const DEFAULT_MAX_MESSAGES: usize = 10;

/// Default window length in seconds.
const DEFAULT_PERIOD_SECONDS: i64 = 60;

/// Per-user sliding-window message counter.
///
/// State is held behind a `Mutex` so a clone of the limiter shared across
/// request handlers enforces one process-wide budget per user. Timestamps
/// outside the window are pruned on every check, so memory stays bounded by
/// the number of recently active users.
#[derive(Clone)]
pub struct RateLimiter {
    timestamps: Arc<Mutex<HashMap<i64, Vec<DateTime<Utc>>>>>,
    max_messages: usize,
    period: Duration,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_messages` per `period` per user.
    pub fn new(max_messages: usize, period: Duration) -> Self {
        Self {
            timestamps: Arc::new(Mutex::new(HashMap::new())),
            max_messages,
            period,
        }
    }

    /// Records an attempt for `user_id` and reports whether it is allowed.
    ///
    /// Rejected attempts are not recorded; a user hammering the limit does
    /// not push their own window forward.
    pub fn check(&self, user_id: i64) -> bool {
        self.check_at(user_id, Utc::now())
    }

    /// Clock-parameterized variant of [`check`](Self::check).
    fn check_at(&self, user_id: i64, now: DateTime<Utc>) -> bool {
        let mut timestamps = self
            .timestamps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let cutoff = now - self.period;
        let entry = timestamps.entry(user_id).or_default();
        entry.retain(|ts| *ts > cutoff);

        if entry.len() >= self.max_messages {
            return false;
        }

        entry.push(now);
        true
    }

    /// Number of users currently holding rate-limit state.
    pub fn tracked_users(&self) -> usize {
        self.timestamps
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Configured message budget per window.
    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Configured window length.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_MESSAGES,
            Duration::seconds(DEFAULT_PERIOD_SECONDS),
        )
    }
}
