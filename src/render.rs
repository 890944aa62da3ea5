//! Terminal rendering for month views.
//!
//! Both layouts read the same `MonthView`: the grid shows the familiar
//! 7-column calendar with the month's events listed underneath, the list shows
//! one line per day.

use chrono::{Datelike, NaiveDate};
use famplan_core::grid::CalendarDay;
use famplan_core::view::{MonthView, ViewMode};
use famplan_core::{CalendarCell, Event};
use owo_colors::OwoColorize;

/// Width of one day column in the grid layout
const CELL_WIDTH: usize = 4;

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = format!("{:>7}", self.render_time());
        format!("{} {} {}", time.dimmed(), self.title, format!("#{}", self.id).dimmed())
    }
}

impl Render for CalendarDay {
    /// Day number, padded to the grid column. Sundays red, Saturdays blue.
    fn render(&self) -> String {
        let label = format!("{:>2}", self.date.day());
        if self.is_today {
            label.reversed().bold().to_string()
        } else if self.is_weekend_leading {
            label.red().to_string()
        } else if self.is_weekend_trailing {
            label.blue().to_string()
        } else {
            label
        }
    }
}

pub fn render_month(view: &MonthView, mode: ViewMode) -> String {
    match mode {
        ViewMode::Grid => render_grid(view),
        ViewMode::List => render_list(view),
    }
}

fn month_title(view: &MonthView) -> String {
    format!("📅 {}", view.month_anchor.format("%B %Y"))
        .bold()
        .to_string()
}

/// The 7-column grid, then each day's events underneath.
pub fn render_grid(view: &MonthView) -> String {
    let mut lines = vec![month_title(view)];

    let header: Vec<String> = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(idx, day)| {
            let label = format!("{:>width$}", day, width = CELL_WIDTH);
            match idx {
                0 => label.red().to_string(),
                6 => label.blue().to_string(),
                _ => label.dimmed().to_string(),
            }
        })
        .collect();
    lines.push(header.concat());

    for row in view.grid_rows() {
        lines.push(row.iter().map(render_grid_cell).collect::<String>());
    }

    let busy_days: Vec<&CalendarCell> = view.list_rows().filter(|c| !c.events.is_empty()).collect();
    if !busy_days.is_empty() {
        lines.push(String::new());
        for cell in busy_days {
            lines.extend(render_day_events(cell));
        }
    }

    lines.join("\n")
}

/// One grid column: the day number, with a marker when the day has events.
fn render_grid_cell(cell: &CalendarCell) -> String {
    match cell.day {
        None => " ".repeat(CELL_WIDTH),
        Some(day) => {
            let marker = if cell.events.is_empty() {
                " ".to_string()
            } else {
                "•".yellow().to_string()
            };
            format!("{}{}{}", " ".repeat(CELL_WIDTH - 3), day.render(), marker)
        }
    }
}

fn render_day_events(cell: &CalendarCell) -> Vec<String> {
    let Some(day) = cell.day else {
        return Vec::new();
    };

    let mut lines = vec![format!("   {}", day_label(day.date)).bold().to_string()];
    lines.extend(cell.events.iter().map(|event| format!("   {}", event.render())));
    lines
}

/// One line per day; days without events are shown dimmed.
pub fn render_list(view: &MonthView) -> String {
    let mut lines = vec![month_title(view)];

    for cell in view.list_rows() {
        let Some(day) = cell.day else { continue };

        let label = format!("{:<10}", day_label(day.date));
        let label = if day.is_today {
            label.reversed().bold().to_string()
        } else if day.is_weekend_leading {
            label.red().to_string()
        } else if day.is_weekend_trailing {
            label.blue().to_string()
        } else {
            label
        };

        if cell.events.is_empty() {
            lines.push(format!("   {} {}", label, "-".dimmed()));
            continue;
        }

        let events: Vec<String> = cell
            .events
            .iter()
            .map(|e| match &e.time {
                Some(time) => format!("{} {}", time.dimmed(), e.title),
                None => e.title.clone(),
            })
            .collect();
        lines.push(format!("   {} {}", label, events.join(", ")));
    }

    lines.join("\n")
}

/// e.g. "Tue Mar 5"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %b %-d").to_string()
}
