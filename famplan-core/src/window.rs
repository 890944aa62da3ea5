//! The rolling range of months a caller pages through.

use std::collections::VecDeque;

use chrono::{Datelike, NaiveDate};

use crate::grid::{add_months, first_of_month};

/// Months shown when a window is first opened (current month + 11)
pub const INITIAL_MONTHS: usize = 12;

/// Months appended by "load more"
pub const LOAD_MORE_MONTHS: usize = 5;

/// Months prepended by "load previous"
pub const LOAD_PREVIOUS_MONTHS: usize = 6;

/// Ordered, contiguous month anchors (each the 1st of its month).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    anchors: VecDeque<NaiveDate>,
}

impl MonthWindow {
    /// The month containing `today` and the months after it.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self::with_len(today, INITIAL_MONTHS)
    }

    /// `len` consecutive months starting with the month of `start` (at least one).
    pub fn with_len(start: NaiveDate, len: usize) -> Self {
        let first = first_of_month(start);
        let anchors = (0..len.max(1) as i32).map(|i| add_months(first, i)).collect();
        MonthWindow { anchors }
    }

    pub fn anchors(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.anchors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.anchors.front().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.anchors.back().copied()
    }

    /// Append `months` months after the last one.
    pub fn extend_forward(&mut self, months: usize) {
        let Some(last) = self.last() else { return };
        for i in 1..=months as i32 {
            self.anchors.push_back(add_months(last, i));
        }
    }

    /// Prepend `months` months before the first one.
    pub fn extend_backward(&mut self, months: usize) {
        let Some(first) = self.first() else { return };
        for i in 1..=months as i32 {
            self.anchors.push_front(add_months(first, -i));
        }
    }

    /// Whether the month of `date` is in the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.anchors
            .iter()
            .any(|a| a.year() == date.year() && a.month() == date.month())
    }

    /// Make sure today's month is visible, resetting the window if it isn't.
    /// Returns true if the window was reset.
    pub fn go_to_today(&mut self, today: NaiveDate) -> bool {
        if self.contains(today) {
            return false;
        }
        *self = Self::starting_at(today);
        true
    }
}
