//! Planner event types.
//!
//! Events are stored as a flat list. Every date that enters the system, whether
//! a plain `YYYY-MM-DD` string, an RFC 3339 timestamp or a document-store
//! timestamp object, is reduced to a calendar day here at the serde boundary,
//! so nothing downstream has to care about time zones.
//!
//! Timestamps name an instant, not a day: a family in Seoul that picked
//! March 5 has it stored as `2024-03-04T15:00:00.000Z`. They are read in the
//! zone set with [`set_day_zone`], or the system's local zone otherwise.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// A planner event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOfDay>,
    /// Family member that owns the event
    #[serde(alias = "userId", default)]
    pub owner_id: String,
    /// Display-only color tag (e.g. "bg-emerald-400")
    #[serde(default)]
    pub color: String,
}

/// An event payload submitted for creation, before it has a final id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    /// Client-generated id; the store assigns one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeOfDay>,
    #[serde(alias = "userId", default)]
    pub owner_id: String,
    #[serde(default)]
    pub color: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        EventDraft {
            id: None,
            title: title.into(),
            date,
            time: None,
            owner_id: String::new(),
            color: String::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_time(mut self, time: TimeOfDay) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>, color: impl Into<String>) -> Self {
        self.owner_id = owner_id.into();
        self.color = color.into();
        self
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if self.id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(PlannerError::InvalidEvent("id must not be empty".into()));
        }
        validate_title(&self.title)
    }

    /// Finalize the draft, using `generate_id` when the draft carries no id.
    pub fn into_event(self, generate_id: impl FnOnce() -> String) -> Event {
        Event {
            id: self.id.unwrap_or_else(generate_id),
            title: self.title,
            date: self.date,
            time: self.time,
            owner_id: self.owner_id,
            color: self.color,
        }
    }
}

impl Event {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.id.trim().is_empty() {
            return Err(PlannerError::InvalidEvent("id must not be empty".into()));
        }
        validate_title(&self.title)
    }

    /// Render the time for display ("14:00", or "all-day" when untimed)
    pub fn render_time(&self) -> String {
        match &self.time {
            Some(time) => time.to_string(),
            None => "all-day".to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn validate_title(title: &str) -> PlannerResult<()> {
    if title.trim().is_empty() {
        return Err(PlannerError::InvalidEvent("title must not be empty".into()));
    }
    Ok(())
}

// =============================================================================
// Time of day
// =============================================================================

/// A 24-hour "HH:MM" time of day.
///
/// Always zero-padded, so string order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(String);

impl TimeOfDay {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidTime(s.to_string());

        let (hours, minutes) = s.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hours: u8 = hours.parse().map_err(|_| invalid())?;
        let minutes: u8 = minutes.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(TimeOfDay(s.to_string()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = PlannerError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Calendar day (de)serialization
// =============================================================================

static DAY_ZONE: OnceLock<Tz> = OnceLock::new();

/// Read timestamps in `zone` from now on. Only the first call takes effect;
/// returns false when a zone was already set.
pub fn set_day_zone(zone: Tz) -> bool {
    DAY_ZONE.set(zone).is_ok()
}

/// The calendar day an instant falls on in `zone`, or in the local zone.
pub fn day_in_zone<Z: TimeZone>(instant: &DateTime<Z>, zone: Option<&Tz>) -> NaiveDate {
    match zone {
        Some(zone) => instant.with_timezone(zone).date_naive(),
        None => instant.with_timezone(&Local).date_naive(),
    }
}

/// The calendar day an instant falls on for this family.
pub fn day_of<Z: TimeZone>(instant: &DateTime<Z>) -> NaiveDate {
    day_in_zone(instant, DAY_ZONE.get())
}

/// Today, in the family's zone.
pub fn today() -> NaiveDate {
    day_of(&Utc::now())
}

/// Parse a date string into a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM[:SS]`
/// datetimes. RFC 3339 timestamps are instants and land on their day in the
/// family's zone; naive datetimes keep the date as written.
pub fn parse_calendar_day(s: &str) -> PlannerResult<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(day_of(&dt));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    Err(PlannerError::InvalidEvent(format!(
        "Invalid date '{}'. Expected YYYY-MM-DD",
        s
    )))
}

pub(crate) mod calendar_day {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Either a date string or a document-store timestamp object
    /// (`{ "seconds": .., "nanoseconds": .. }`).
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDay {
        Text(String),
        Timestamp {
            seconds: i64,
            #[serde(default)]
            nanoseconds: u32,
        },
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        match RawDay::deserialize(deserializer)? {
            RawDay::Text(s) => super::parse_calendar_day(&s).map_err(de::Error::custom),
            RawDay::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(seconds, nanoseconds)
                .map(|dt| super::day_of(&dt))
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {seconds}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Tests that read timestamps all use the Seoul family's zone.
    fn in_seoul() {
        set_day_zone(chrono_tz::Asia::Seoul);
    }

    #[test]
    fn test_time_of_day_accepts_padded_24h() {
        assert_eq!("00:00".parse::<TimeOfDay>().unwrap().as_str(), "00:00");
        assert_eq!("23:59".parse::<TimeOfDay>().unwrap().as_str(), "23:59");
    }

    #[test]
    fn test_time_of_day_rejects_malformed() {
        for bad in ["9:00", "24:00", "12:60", "12-30", "ab:cd", "", "12:300"] {
            assert!(bad.parse::<TimeOfDay>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_time_of_day_orders_chronologically() {
        let early: TimeOfDay = "08:30".parse().unwrap();
        let late: TimeOfDay = "09:00".parse().unwrap();
        assert!(early < late);
    }

    #[test]
    fn test_day_in_zone() {
        let instant = DateTime::parse_from_rfc3339("2024-03-04T15:00:00Z").unwrap();

        assert_eq!(day_in_zone(&instant, Some(&chrono_tz::Asia::Seoul)), date(2024, 3, 5));
        assert_eq!(day_in_zone(&instant, Some(&chrono_tz::UTC)), date(2024, 3, 4));
        assert_eq!(
            day_in_zone(&instant, Some(&chrono_tz::America::Los_Angeles)),
            date(2024, 3, 4)
        );
    }

    #[test]
    fn test_parse_calendar_day_from_timestamps() {
        in_seoul();
        assert_eq!(parse_calendar_day("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(
            parse_calendar_day("2024-03-05T23:30:00.000+09:00").unwrap(),
            date(2024, 3, 5)
        );
        assert_eq!(parse_calendar_day("2024-03-05T14:00").unwrap(), date(2024, 3, 5));
        assert!(parse_calendar_day("March 5th").is_err());
    }

    #[test]
    fn test_deserialize_stored_file_format() {
        in_seoul();
        // Local midnight of March 5 in Seoul, as a UTC instant
        let json = r#"{
            "id": "1733000000000",
            "title": "Dentist",
            "time": "14:00",
            "date": "2024-03-04T15:00:00.000Z",
            "userId": "mom",
            "color": "bg-indigo-400"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.date, date(2024, 3, 5));
        assert_eq!(event.owner_id, "mom");
        assert_eq!(event.time.as_ref().map(TimeOfDay::as_str), Some("14:00"));
    }

    #[test]
    fn test_deserialize_document_store_timestamp() {
        in_seoul();
        // 2024-03-04T15:00:00Z, midnight of March 5 in Seoul
        let json = r#"{"id":"a","title":"Gym","date":{"seconds":1709564400,"nanoseconds":0}}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.date, date(2024, 3, 5));
        assert_eq!(event.time, None);
    }

    #[test]
    fn test_serialize_uses_plain_date_and_camel_case() {
        let event = EventDraft::new("Gym", date(2024, 3, 6))
            .with_owner("dad", "bg-rose-400")
            .into_event(|| "x".to_string());

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["date"], "2024-03-06");
        assert_eq!(value["ownerId"], "dad");
        assert!(value.get("time").is_none());
    }

    #[test]
    fn test_invalid_time_rejected_on_deserialize() {
        let json = r#"{"id":"a","title":"Gym","date":"2024-03-05","time":"25:00"}"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_draft_validation() {
        assert!(EventDraft::new("  ", date(2024, 1, 1)).validate().is_err());
        assert!(EventDraft::new("ok", date(2024, 1, 1)).with_id("").validate().is_err());
        assert!(EventDraft::new("ok", date(2024, 1, 1)).validate().is_ok());
    }

    #[test]
    fn test_into_event_keeps_client_id() {
        let event = EventDraft::new("Gym", date(2024, 3, 6))
            .with_id("client-1")
            .into_event(|| "generated".to_string());
        assert_eq!(event.id, "client-1");

        let event = EventDraft::new("Gym", date(2024, 3, 6)).into_event(|| "generated".to_string());
        assert_eq!(event.id, "generated");
    }
}
