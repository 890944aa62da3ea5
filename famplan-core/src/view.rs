//! Month views: the month grid with each day's events placed in it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::grid::{CalendarCell, build_month_grid, first_of_month};
use crate::index::index_by_day;

/// Columns in the month-grid layout (Sunday..Saturday)
pub const WEEK_LENGTH: usize = 7;

/// One month, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView<'a> {
    #[serde(with = "crate::event::calendar_day")]
    pub month_anchor: NaiveDate,
    pub cells: Vec<CalendarCell<'a>>,
}

/// How a month view is laid out. Both layouts read the same [`MonthView`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Blank-padded 7-column grid
    #[default]
    Grid,
    /// One row per day, no blanks
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" | "month" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("Unknown view mode '{}'. Expected grid or list", other)),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::List => write!(f, "list"),
        }
    }
}

/// Build the view of the month containing `month_anchor`.
pub fn build_month_view<'a>(
    month_anchor: NaiveDate,
    today: NaiveDate,
    events: &'a [Event],
) -> MonthView<'a> {
    let mut cells = build_month_grid(month_anchor, today);

    for cell in &mut cells {
        if let Some(day) = cell.day {
            cell.events = index_by_day(events, day.date);
        }
    }

    MonthView {
        month_anchor: first_of_month(month_anchor),
        cells,
    }
}

impl<'a> MonthView<'a> {
    /// Rows of the month-grid layout. The last row may be shorter than a week.
    pub fn grid_rows(&self) -> impl Iterator<Item = &[CalendarCell<'a>]> {
        self.cells.chunks(WEEK_LENGTH)
    }

    /// Rows of the list layout: every day of the month, blanks skipped.
    pub fn list_rows(&self) -> impl Iterator<Item = &CalendarCell<'a>> {
        self.cells.iter().filter(|cell| !cell.is_blank())
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&CalendarCell<'a>> {
        self.list_rows().find(|cell| cell.date() == Some(date))
    }

    /// The cell marked as today, if today falls in this month.
    pub fn today(&self) -> Option<&CalendarCell<'a>> {
        self.list_rows()
            .find(|cell| cell.day.is_some_and(|day| day.is_today))
    }

    pub fn event_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.events.len()).sum()
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_blank()).count()
    }
}
