//! Id minting and relative-time formatting.

use chrono::Utc;
use rand::Rng;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Wall clock that never hands out the same millisecond twice.
#[derive(Debug, Clone, Default)]
pub struct MonotonicClock {
    last: i64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> i64 {
        self.tick_from(now_millis())
    }

    /// Advance using an externally supplied wall-clock reading.
    pub fn tick_from(&mut self, wall: i64) -> i64 {
        let next = if wall > self.last { wall } else { self.last + 1 };
        self.last = next;
        next
    }
}

pub fn comment_id<R: Rng + ?Sized>(timestamp: i64, rng: &mut R) -> String {
    format!("c-{}-{}", timestamp, rng.gen_range(0..1000))
}

pub fn post_id(timestamp: i64) -> String {
    format!("post-{}", timestamp)
}

pub fn time_ago(timestamp: i64, now: i64) -> String {
    let seconds = (now - timestamp).max(0) / 1000;
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}
