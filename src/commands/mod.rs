pub mod agenda;
pub mod event;
pub mod login;
pub mod month;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use famplan_core::event::parse_calendar_day;

/// Days shown by `famplan agenda` when --days is not given
pub const DEFAULT_AGENDA_DAYS: i64 = 14;

/// Parse a YYYY-MM-DD command-line date
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    parse_calendar_day(s).with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

/// Parse a YYYY-MM command-line month into its first day
pub fn parse_month_arg(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}'. Expected YYYY-MM", s))
}
