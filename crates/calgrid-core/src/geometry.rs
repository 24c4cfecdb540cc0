//! Time-grid geometry for day and week views.
//!
//! A resource's day track is a vertical strip split into fixed-length slots
//! (rows). Inside that strip, overlapping appointments are placed side by side
//! in columns.
//!
//! # Overview
//!
//! - [`Column`] - An appointment's horizontal slot and the width of its cluster
//! - [`SlotGrid`] - Mapping between wall-clock time and 1-based grid rows
//!
//! Horizontal geometry is expressed in percentages of the track width, and
//! vertical geometry in grid rows or in `rem` via [`SlotGrid::row_height`].

use chrono::{NaiveTime, Timelike};

use crate::time::TimeRange;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Horizontal placement of an appointment within its overlap cluster.
///
/// # Examples
///
/// ```
/// # use calgrid_core::geometry::Column;
/// let column = Column::new(1, 4);
/// assert_eq!(column.width_percent(), 25.0);
/// assert_eq!(column.left_percent(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    index: usize,
    count: usize,
}

impl Column {
    /// Creates a column placement. `count` is raised to `index + 1` if smaller.
    pub fn new(index: usize, count: usize) -> Self {
        Self {
            index,
            count: count.max(index + 1),
        }
    }

    /// Zero-based slot within the cluster.
    pub fn index(self) -> usize {
        self.index
    }

    /// Number of slots the cluster is divided into.
    pub fn count(self) -> usize {
        self.count
    }

    /// Width as a percentage of the track: `100 / count`.
    pub fn width_percent(self) -> f32 {
        100.0 / self.count as f32
    }

    /// Left offset as a percentage of the track: `index * (100 / count)`.
    pub fn left_percent(self) -> f32 {
        self.index as f32 * self.width_percent()
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

/// Fixed-interval grid of rows covering one calendar day.
///
/// Rows are 1-based to match CSS grid line numbering: the slot starting at
/// midnight is row 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGrid {
    slot_minutes: u32,
    row_height: f32,
}

impl SlotGrid {
    /// Default slot length in minutes.
    pub const DEFAULT_SLOT_MINUTES: u32 = 15;

    /// Default row height in `rem`.
    pub const DEFAULT_ROW_HEIGHT: f32 = 1.5;

    /// Creates a grid. A zero slot length is treated as one minute.
    pub fn new(slot_minutes: u32, row_height: f32) -> Self {
        Self {
            slot_minutes: slot_minutes.clamp(1, MINUTES_PER_DAY),
            row_height,
        }
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Number of rows in a day.
    pub fn rows(&self) -> u32 {
        MINUTES_PER_DAY.div_ceil(self.slot_minutes)
    }

    /// 1-based row containing `time`.
    pub fn row_of(&self, time: NaiveTime) -> u32 {
        minutes_since_midnight(time) / self.slot_minutes + 1
    }

    /// Grid lines `(start, end)` spanned by `range`.
    ///
    /// A range ending at or after the following midnight ends on the line
    /// below the last row.
    pub fn row_span(&self, range: TimeRange) -> (u32, u32) {
        let start = self.row_of(range.start().time());
        let end = if range.end().date() > range.start().date() {
            self.rows() + 1
        } else {
            self.row_of(range.end().time())
        };
        (start, end.max(start + 1))
    }

    /// Distance from the top of the track to `time`, in `rem`.
    ///
    /// Used for the "now" indicator and for initial scroll position.
    pub fn offset_of(&self, time: NaiveTime) -> f32 {
        minutes_since_midnight(time) as f32 / self.slot_minutes as f32 * self.row_height
    }
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLOT_MINUTES, Self::DEFAULT_ROW_HEIGHT)
    }
}

fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn column_strategy() -> impl Strategy<Value = Column> {
        (1usize..32).prop_flat_map(|count| (0..count).prop_map(move |index| Column::new(index, count)))
    }

    fn time_strategy() -> impl Strategy<Value = NaiveTime> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    /// A column never extends past the right edge of the track.
    fn check_column_within_track(column: Column) -> Result<(), TestCaseError> {
        let right = column.left_percent() + column.width_percent();
        prop_assert!(right <= 100.0 + 1e-3);
        prop_assert!(column.left_percent() >= 0.0);
        Ok(())
    }

    /// Adjacent columns of the same cluster tile without gaps.
    fn check_columns_tile(column: Column) -> Result<(), TestCaseError> {
        if column.index() + 1 < column.count() {
            let next = Column::new(column.index() + 1, column.count());
            let right = column.left_percent() + column.width_percent();
            prop_assert!(approx_eq!(f32, right, next.left_percent(), epsilon = 1e-3));
        }
        Ok(())
    }

    /// Every time of day maps to a row inside the grid.
    fn check_row_in_range(slot_minutes: u32, time: NaiveTime) -> Result<(), TestCaseError> {
        let grid = SlotGrid::new(slot_minutes, 1.0);
        let row = grid.row_of(time);
        prop_assert!(row >= 1 && row <= grid.rows());
        let minutes = minutes_since_midnight(time);
        prop_assert!((row - 1) * slot_minutes <= minutes && minutes < row * slot_minutes);
        Ok(())
    }

    proptest! {
        #[test]
        fn column_within_track(column in column_strategy()) {
            check_column_within_track(column)?;
        }

        #[test]
        fn columns_tile(column in column_strategy()) {
            check_columns_tile(column)?;
        }

        #[test]
        fn row_in_range(slot_minutes in 1u32..120, time in time_strategy()) {
            check_row_in_range(slot_minutes, time)?;
        }
    }
}
