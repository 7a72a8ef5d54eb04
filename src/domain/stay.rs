//! Stay intervals and the overlap rule

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` during which a cabin is occupied.
///
/// `start < end` is guaranteed by request validation, not by this type;
/// the overlap rule stays well-defined for empty or reversed intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StayInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Two stays conflict iff each starts before the other ends.
    ///
    /// A checkout and a check-in at the same instant do not conflict.
    pub fn overlaps(&self, other: &StayInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Inclusive variant of [`overlaps`](Self::overlaps): shared endpoints count.
    pub fn touches(&self, other: &StayInterval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Free-function form of [`StayInterval::overlaps`].
pub fn overlaps(a: &StayInterval, b: &StayInterval) -> bool {
    a.overlaps(b)
}
