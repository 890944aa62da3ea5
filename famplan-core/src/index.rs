//! Per-day event lookup and ordering.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::event::Event;

/// Events on `day`, timed events first in time order, untimed events last.
///
/// The sort is stable: events that compare equal (two untimed events, or two
/// events at the same time) keep their order from `events`.
pub fn index_by_day(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    let mut on_day: Vec<&Event> = events.iter().filter(|e| e.date == day).collect();
    on_day.sort_by(|a, b| compare_time_of_day(a, b));
    on_day
}

/// All events grouped by calendar day, each day ordered like [`index_by_day`].
pub fn group_by_day(events: &[Event]) -> BTreeMap<NaiveDate, Vec<&Event>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in events {
        days.entry(event.date).or_default().push(event);
    }
    for day_events in days.values_mut() {
        day_events.sort_by(|a, b| compare_time_of_day(a, b));
    }
    days
}

/// Ordering within a single day. Untimed events sort after timed ones.
pub fn compare_time_of_day(a: &Event, b: &Event) -> Ordering {
    match (&a.time, &b.time) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
