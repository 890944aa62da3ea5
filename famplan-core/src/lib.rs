//! Core library for famplan, a family planner.
//!
//! This crate provides everything the CLI and server share:
//! - `event` for planner events and their JSON format
//! - `grid`, `index` and `view` for building month views
//! - `window` for the range of months a caller pages through
//! - `store` for the `EventStore` trait and its local backends
//! - `roster`, `session` and `config` for logins and settings

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod index;
pub mod roster;
pub mod session;
pub mod store;
pub mod view;
pub mod window;

pub use error::{PlannerError, PlannerResult};
pub use event::{Event, EventDraft, TimeOfDay};
pub use grid::{CalendarCell, CalendarDay, build_month_grid};
pub use index::index_by_day;
pub use store::EventStore;
pub use view::{MonthView, ViewMode, build_month_view};
