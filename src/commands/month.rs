use anyhow::Result;
use chrono::NaiveDate;
use famplan_core::store::list_or_empty;
use famplan_core::view::{ViewMode, build_month_view};
use famplan_core::window::MonthWindow;

use crate::backend::Planner;
use crate::render::render_month;

/// Print `months` consecutive month views starting at `start`.
pub async fn run(
    planner: &Planner,
    start: NaiveDate,
    months: usize,
    mode: ViewMode,
    today: NaiveDate,
) -> Result<()> {
    let events = list_or_empty(planner.store.as_ref()).await;
    let window = MonthWindow::with_len(start, months);

    let rendered: Vec<String> = window
        .anchors()
        .map(|anchor| render_month(&build_month_view(anchor, today, &events), mode))
        .collect();

    println!("{}", rendered.join("\n\n"));
    Ok(())
}
