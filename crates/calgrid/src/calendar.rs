//! Calendar views and date navigation.
//!
//! Weeks start on Sunday. Month navigation clamps the day of month, so
//! stepping forward from January 31 lands on the last day of February.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use calgrid_core::appointment::Appointment;

/// Which span of time the calendar shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Day,
    Week,
    Month,
}

impl FromStr for ViewKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            _ => Err("Unsupported calendar view"),
        }
    }
}

impl From<ViewKind> for &'static str {
    fn from(val: ViewKind) -> Self {
        match val {
            ViewKind::Day => "day",
            ViewKind::Week => "week",
            ViewKind::Month => "month",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Navigation direction for previous/next buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Moves `date` one view-length in `direction`.
///
/// Dates that would fall outside chrono's range are returned unchanged.
pub fn step(view: ViewKind, date: NaiveDate, direction: Direction) -> NaiveDate {
    let moved = match (view, direction) {
        (ViewKind::Day, Direction::Previous) => date.checked_sub_days(Days::new(1)),
        (ViewKind::Day, Direction::Next) => date.checked_add_days(Days::new(1)),
        (ViewKind::Week, Direction::Previous) => date.checked_sub_days(Days::new(7)),
        (ViewKind::Week, Direction::Next) => date.checked_add_days(Days::new(7)),
        (ViewKind::Month, Direction::Previous) => date.checked_sub_months(Months::new(1)),
        (ViewKind::Month, Direction::Next) => date.checked_add_months(Months::new(1)),
    };
    moved.unwrap_or(date)
}

/// Sunday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// The seven dates, Sunday to Saturday, of the week containing `date`.
pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    week_start(date).iter_days().take(7).collect()
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    date: NaiveDate,
    in_month: bool,
}

impl MonthCell {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// False for the leading and trailing days borrowed from neighbor months.
    pub fn in_month(&self) -> bool {
        self.in_month
    }
}

/// Cells of the month grid for the month containing `date`.
///
/// The grid starts on the Sunday on or before the first of the month and
/// ends on the Saturday on or after the last day, so its length is always a
/// multiple of seven.
pub fn month_grid(date: NaiveDate) -> Vec<MonthCell> {
    let first = first_of_month(date);
    let last = last_of_month(date);
    let grid_start = week_start(first);
    let trailing = 6 - u64::from(last.weekday().num_days_from_sunday());
    let grid_end = last.checked_add_days(Days::new(trailing)).unwrap_or(last);

    grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .map(|day| MonthCell {
            date: day,
            in_month: day.month() == first.month() && day.year() == first.year(),
        })
        .collect()
}

/// Dates covered by `view` around `date`.
///
/// Month views cover only the days of the month itself.
pub fn visible_dates(view: ViewKind, date: NaiveDate) -> Vec<NaiveDate> {
    match view {
        ViewKind::Day => vec![date],
        ViewKind::Week => week_days(date),
        ViewKind::Month => first_of_month(date)
            .iter_days()
            .take_while(|day| *day <= last_of_month(date))
            .collect(),
    }
}

/// Whether `today` is inside the span `view` shows around `date`.
///
/// Drives the enabled state of a "Today" button.
pub fn contains_today(view: ViewKind, date: NaiveDate, today: NaiveDate) -> bool {
    match view {
        ViewKind::Day => date == today,
        ViewKind::Week => week_start(date) == week_start(today),
        ViewKind::Month => date.year() == today.year() && date.month() == today.month(),
    }
}

/// What a month cell shows: the first few appointments, and how many more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPreview<'a> {
    visible: Vec<&'a Appointment>,
    hidden: usize,
}

impl<'a> DayPreview<'a> {
    /// Builds a preview of `appointments` on `date`, earliest first.
    pub fn new<I>(appointments: I, date: NaiveDate, limit: usize) -> Self
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let mut on_day: Vec<&'a Appointment> = appointments
            .into_iter()
            .filter(|appt| appt.time().date() == date)
            .collect();
        on_day.sort_by_key(|appt| appt.time().start());

        let hidden = on_day.len().saturating_sub(limit);
        on_day.truncate(limit);
        Self {
            visible: on_day,
            hidden,
        }
    }

    pub fn visible(&self) -> &[&'a Appointment] {
        &self.visible
    }

    /// Count for the "+N more" label.
    pub fn hidden(&self) -> usize {
        self.hidden
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}
