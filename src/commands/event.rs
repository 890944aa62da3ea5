use anyhow::{Context, Result};
use chrono::NaiveDate;
use famplan_core::{Event, EventDraft, TimeOfDay};
use owo_colors::OwoColorize;

use crate::backend::Planner;
use crate::render::{Render, day_label};

/// Changes requested by `famplan edit`
pub struct EventEdit {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeOfDay>,
    pub clear_time: bool,
}

impl EventEdit {
    fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if self.clear_time {
            event.time = None;
        } else if let Some(time) = self.time {
            event.time = Some(time);
        }
    }
}

pub async fn add(
    planner: &Planner,
    title: String,
    date: NaiveDate,
    time: Option<TimeOfDay>,
    id: Option<String>,
) -> Result<()> {
    let session = planner.require_session()?;

    let mut draft = EventDraft::new(title, date).with_owner(&session.member.id, &session.member.color);
    draft.time = time;
    draft.id = id;

    let events = planner.store.create(draft).await?;

    // Stores append, so the new event is last
    match events.last() {
        Some(event) => println!("{} {} {}", "+".green(), day_label(event.date), event.render()),
        None => println!("{} Event created", "+".green()),
    }

    Ok(())
}

pub async fn edit(planner: &Planner, id: &str, changes: EventEdit) -> Result<()> {
    planner.require_session()?;

    let mut event = find_event(planner, id).await?;
    changes.apply_to(&mut event);
    planner.store.update(event.clone()).await?;

    println!("{} {} {}", "~".yellow(), day_label(event.date), event.render());
    Ok(())
}

pub async fn remove(planner: &Planner, id: &str) -> Result<()> {
    planner.require_session()?;

    let event = find_event(planner, id).await?;
    planner.store.remove(id).await?;

    println!("{} {} {}", "-".red(), day_label(event.date), event.render());
    Ok(())
}

async fn find_event(planner: &Planner, id: &str) -> Result<Event> {
    planner
        .store
        .list()
        .await
        .context("Failed to load events")?
        .into_iter()
        .find(|e| e.id == id)
        .with_context(|| format!("Event '{}' not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        EventDraft::new("Dentist", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .with_id("1")
            .with_time("14:00".parse().unwrap())
            .into_event(String::new)
    }

    #[test]
    fn test_edit_keeps_unchanged_fields() {
        let mut event = event();
        EventEdit {
            title: Some("Orthodontist".to_string()),
            date: None,
            time: None,
            clear_time: false,
        }
        .apply_to(&mut event);

        assert_eq!(event.title, "Orthodontist");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(event.time.as_ref().map(TimeOfDay::as_str), Some("14:00"));
        assert_eq!(event.id, "1");
    }

    #[test]
    fn test_edit_can_clear_time() {
        let mut event = event();
        EventEdit {
            title: None,
            date: None,
            time: None,
            clear_time: true,
        }
        .apply_to(&mut event);

        assert_eq!(event.time, None);
    }
}
