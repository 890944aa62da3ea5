//! Month grid generation.
//!
//! A month grid is the sequence of cells a 7-column calendar renders: one
//! blank per weekday before the 1st (weeks start on Sunday), then one cell per
//! day of the month. There is no trailing padding.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::event::Event;

/// A concrete day in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[serde(with = "crate::event::calendar_day")]
    pub date: NaiveDate,
    pub is_today: bool,
    /// Sunday, the first column
    pub is_weekend_leading: bool,
    /// Saturday, the last column
    pub is_weekend_trailing: bool,
}

/// One cell of a month grid. `day` is `None` for leading blanks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell<'a> {
    pub day: Option<CalendarDay>,
    pub events: Vec<&'a Event>,
}

impl CalendarCell<'_> {
    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.day.map(|d| d.date)
    }
}

/// Build the cell skeleton for the month containing `month_anchor`.
///
/// Cells carry no events yet; see [`crate::view::build_month_view`].
pub fn build_month_grid<'a>(month_anchor: NaiveDate, today: NaiveDate) -> Vec<CalendarCell<'a>> {
    let first = first_of_month(month_anchor);
    let last = last_of_month(month_anchor);
    let blanks = leading_blanks(month_anchor);

    let mut cells = Vec::with_capacity(blanks + days_in_month(month_anchor) as usize);

    cells.extend((0..blanks).map(|_| CalendarCell {
        day: None,
        events: Vec::new(),
    }));

    cells.extend(first.iter_days().take_while(|d| *d <= last).map(|date| {
        let weekday = date.weekday();
        CalendarCell {
            day: Some(CalendarDay {
                date,
                is_today: date == today,
                is_weekend_leading: weekday == Weekday::Sun,
                is_weekend_trailing: weekday == Weekday::Sat,
            }),
            events: Vec::new(),
        }
    }));

    cells
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        // Only reachable at the very end of chrono's supported range
        .unwrap_or(NaiveDate::MAX)
}

/// Number of days in the month containing `date` (28..=31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

/// Empty cells before day 1: the weekday index of the 1st, Sunday = 0.
pub fn leading_blanks(date: NaiveDate) -> usize {
    first_of_month(date).weekday().num_days_from_sunday() as usize
}

/// Shift `date` by `months` (negative goes back), clamping the day to the
/// target month's length (Jan 31 + 1 month is Feb 28/29).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
