use crate::instant::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed time interval `[min, max]`.
///
/// Used both for the resolved extent of a single object and for the overall
/// extent of a dataset collection. `min <= max` always holds.
///
/// # Examples
///
/// ```
/// use timeline_types::extent::TimeExtent;
/// use timeline_types::instant::Timestamp;
///
/// let jan = TimeExtent::new(
///     Timestamp::from_ymd(2020, 1, 1).unwrap(),
///     Timestamp::from_ymd(2020, 1, 31).unwrap(),
/// );
/// assert!(jan.contains(Timestamp::from_ymd(2020, 1, 15).unwrap()));
/// assert!(!jan.contains(Timestamp::from_ymd(2020, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeExtent {
    min: Timestamp,
    max: Timestamp,
}

impl TimeExtent {
    /// Create an extent from two bounds, ordering them if needed.
    pub fn new(a: Timestamp, b: Timestamp) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Degenerate extent covering a single instant.
    pub fn instant(at: Timestamp) -> Self {
        Self { min: at, max: at }
    }

    pub fn min(&self) -> Timestamp {
        self.min
    }

    pub fn max(&self) -> Timestamp {
        self.max
    }

    /// Length of the extent in milliseconds.
    pub fn duration_millis(&self) -> i64 {
        self.max.millis_since(self.min)
    }

    pub fn is_instant(&self) -> bool {
        self.min == self.max
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: Timestamp) -> bool {
        self.min <= at && at <= self.max
    }

    /// True when the two closed intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeExtent) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Smallest extent covering both.
    pub fn union(&self, other: &TimeExtent) -> TimeExtent {
        TimeExtent {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl fmt::Display for TimeExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
