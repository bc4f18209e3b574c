use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// A single point in time, stored as milliseconds since the Unix epoch.
///
/// Negative values address instants before 1970, which is the common case
/// for historical datasets.
///
/// # Examples
///
/// ```
/// use timeline_types::instant::Timestamp;
///
/// let a = Timestamp::from_ymd(2020, 1, 1).unwrap();
/// let b = Timestamp::from_ymd(2020, 1, 2).unwrap();
/// assert_eq!(b.millis_since(a), 86_400_000);
/// assert!(a < b);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Midnight UTC of the given calendar day, or `None` for an invalid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
        Some(Self(midnight.and_utc().timestamp_millis()))
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_millis())
    }

    /// Convert back to a calendar datetime. `None` when outside chrono's range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        Self::from_datetime(DateTime::<Utc>::from(time))
    }

    /// Signed distance in milliseconds from `earlier` to `self`.
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn saturating_add_millis(self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "{}ms", self.0),
        }
    }
}

/// Width of one timeline bin in milliseconds.
///
/// Widths are usually derived from the pixel width of the visible span, so
/// they are fractional. Construction does not validate; the engine rejects
/// non-positive or non-finite widths when they are used.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanWidth(f64);

impl SpanWidth {
    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    pub fn from_days(days: f64) -> Self {
        Self(days * MILLIS_PER_DAY as f64)
    }

    pub fn from_delta(delta: TimeDelta) -> Self {
        Self(delta.num_milliseconds() as f64)
    }

    pub const fn as_millis(self) -> f64 {
        self.0
    }

    /// Whether this width can partition a timeline (finite and strictly positive).
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl fmt::Display for SpanWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
