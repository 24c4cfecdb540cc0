//! Wall-clock time ranges.
//!
//! Appointments live in local wall-clock time; no timezone conversion is ever
//! performed. A [`TimeRange`] is a half-open interval `[start, end)` over
//! [`NaiveDateTime`], and can only be constructed with `start < end`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use thiserror::Error;

/// Errors raised when building a [`TimeRange`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    #[error("time range is empty: starts and ends at {0}")]
    Empty(NaiveDateTime),

    #[error("time range is inverted: end {end} is before start {start}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// A non-empty, half-open interval of local wall-clock time.
///
/// # Examples
///
/// ```
/// # use calgrid_core::time::TimeRange;
/// # use chrono::NaiveDate;
/// let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
/// let morning = TimeRange::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// ).unwrap();
/// let late = TimeRange::new(
///     day.and_hms_opt(10, 0, 0).unwrap(),
///     day.and_hms_opt(10, 30, 0).unwrap(),
/// ).unwrap();
///
/// // Touching ranges do not overlap.
/// assert!(!morning.overlaps(&late));
/// assert_eq!(morning.duration_minutes(), 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a range, rejecting `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeRangeError> {
        if end == start {
            return Err(TimeRangeError::Empty(start));
        }
        if end < start {
            return Err(TimeRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range of `minutes` starting at `start`.
    pub fn starting_at(start: NaiveDateTime, minutes: i64) -> Result<Self, TimeRangeError> {
        let end = TimeDelta::try_minutes(minutes)
            .and_then(|delta| start.checked_add_signed(delta))
            .unwrap_or(start);
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Calendar date the range starts on. Tracks are keyed by this date.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Length of the range in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Strict overlap test.
    ///
    /// Ranges that only share a boundary (`self.end == other.start`) do not
    /// overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
        TimeRange::new(at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = TimeRange::new(at(9, 0), at(9, 0)).unwrap_err();
        assert_eq!(err, TimeRangeError::Empty(at(9, 0)));
    }

    #[test]
    fn test_new_rejects_inverted() {
        let err = TimeRange::new(at(10, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, TimeRangeError::Inverted { .. }));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = range((9, 0), (9, 30));
        let b = range((9, 30), (10, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlap_partial_and_nested() {
        let a = range((9, 0), (10, 0));
        let b = range((9, 30), (10, 30));
        let inner = range((9, 15), (9, 45));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(a.overlaps(&inner));
        assert!(inner.overlaps(&a));
    }

    #[test]
    fn test_starting_at() {
        let a = TimeRange::starting_at(at(9, 0), 60).unwrap();
        assert_eq!(a.end(), at(10, 0));
        assert!(TimeRange::starting_at(at(9, 0), 0).is_err());
        assert!(TimeRange::starting_at(at(9, 0), -15).is_err());
    }

    #[test]
    fn test_contains_is_half_open() {
        let a = range((9, 0), (10, 0));
        assert!(a.contains(at(9, 0)));
        assert!(a.contains(at(9, 59)));
        assert!(!a.contains(at(10, 0)));
    }

    #[test]
    fn test_display_and_duration() {
        let a = range((14, 30), (15, 15));
        assert_eq!(a.to_string(), "14:30 - 15:15");
        assert_eq!(a.duration_minutes(), 45);
        assert_eq!(a.date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }
}
