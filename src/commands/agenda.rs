use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDate};
use famplan_core::index::group_by_day;
use famplan_core::store::list_or_empty;
use owo_colors::OwoColorize;

use crate::backend::Planner;
use crate::render::{Render, day_label};

/// Last day of an agenda that starts at `from` and shows `days` days.
fn last_day(from: NaiveDate, days: i64) -> Result<NaiveDate> {
    Duration::try_days(days.max(1) - 1)
        .and_then(|span| from.checked_add_signed(span))
        .ok_or_else(|| anyhow!("--days {} reaches past the last supported date", days))
}

/// Print events from `from` for `days` days, grouped by day.
pub async fn run(planner: &Planner, from: NaiveDate, days: i64, today: NaiveDate) -> Result<()> {
    let to = last_day(from, days)?;
    let events = list_or_empty(planner.store.as_ref()).await;
    let by_day = group_by_day(&events);

    let mut printed_any = false;
    for (date, day_events) in by_day.range(from..=to) {
        if printed_any {
            println!();
        }
        printed_any = true;

        let label = match (*date - today).num_days() {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            _ => day_label(*date),
        };
        println!("{}", label.bold());
        for event in day_events {
            println!("  {}", event.render());
        }
    }

    if !printed_any {
        println!("{}", "No events found".dimmed());
    }

    Ok(())
}
