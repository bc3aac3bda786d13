//! Calendar events as supplied by collaborators.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::category::{Category, Color, color_for};
use crate::types::{EventId, ValidationError};

/// Minutes assumed for layout when an event has no end.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

/// A calendar entry. The engine only ever reads these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Local wall-clock start.
    pub start: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category: Category,
    /// Overrides the category color when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default)]
    pub kind: EventKind,
}

/// Decorative distinction between ordinary entries and big occasions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Simple,
    MajorEvent,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::MajorEvent => "major_event",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "major_event" | "majorEvent" => Ok(Self::MajorEvent),
            _ => Err(ValidationError::UnknownKind {
                value: s.to_string(),
            }),
        }
    }
}

impl Event {
    /// Creates a timed event with no end, default category and kind.
    pub fn new(id: EventId, title: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            id,
            title: title.into(),
            start,
            end: None,
            all_day: false,
            category: Category::default(),
            color: None,
            kind: EventKind::default(),
        }
    }

    #[must_use]
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// The calendar day this event is bucketed under.
    pub const fn day_key(&self) -> NaiveDate {
        self.start.date()
    }

    /// The end used for layout: the explicit end, or one hour after start.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end
            .unwrap_or_else(|| self.start + Duration::minutes(DEFAULT_DURATION_MINUTES))
    }

    pub fn display_color(&self) -> Color {
        self.color.unwrap_or_else(|| color_for(self.category))
    }

    pub const fn is_major(&self) -> bool {
        matches!(self.kind, EventKind::MajorEvent)
    }
}

/// An event as it arrives from storage, with timestamps still as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, alias = "allDay")]
    pub all_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TryFrom<EventRecord> for Event {
    type Error = ValidationError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let id = EventId::new(record.id)?;
        let start = parse_timestamp("start", &record.start)?;
        let end = record
            .end
            .as_deref()
            .map(|value| parse_timestamp("end", value))
            .transpose()?;
        // Category, color and kind only decorate an event; bad values fall back.
        let category = record
            .category
            .as_deref()
            .and_then(|value| decoration(&id, value.parse::<Category>()))
            .unwrap_or_default();
        let color = record
            .color
            .as_deref()
            .and_then(|value| decoration(&id, Color::from_hex(value)));
        let kind = record
            .kind
            .as_deref()
            .and_then(|value| decoration(&id, value.parse::<EventKind>()))
            .unwrap_or_default();

        Ok(Self {
            id,
            title: record.title,
            start,
            end,
            all_day: record.all_day,
            category,
            color,
            kind,
        })
    }
}

fn decoration<T>(id: &EventId, parsed: Result<T, ValidationError>) -> Option<T> {
    parsed
        .inspect_err(|e| tracing::warn!(id = %id, error = %e, "ignoring event field"))
        .ok()
}

/// Parses a record timestamp into local wall-clock time.
///
/// Accepts RFC 3339 (converted to the local zone), `YYYY-MM-DDTHH:MM[:SS]`,
/// `YYYY-MM-DD HH:MM[:SS]`, and a bare `YYYY-MM-DD` meaning midnight.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(ValidationError::MalformedTimestamp {
        field,
        value: value.to_string(),
    })
}

/// Converts raw records into events, dropping the ones that cannot be laid out.
///
/// Rejected records are logged and skipped so one bad row never blanks the grid.
pub fn events_from_records(records: impl IntoIterator<Item = EventRecord>) -> Vec<Event> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match Event::try_from(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "skipping unrenderable event record");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, start: &str) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: format!("event {id}"),
            start: start.to_string(),
            ..EventRecord::default()
        }
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn parses_naive_and_date_only_timestamps() {
        assert_eq!(
            parse_timestamp("start", "2024-03-09T10:15").unwrap(),
            dt("2024-03-09T10:15")
        );
        assert_eq!(
            parse_timestamp("start", "2024-03-09 10:15:00").unwrap(),
            dt("2024-03-09T10:15")
        );
        assert_eq!(
            parse_timestamp("start", "2024-03-09").unwrap(),
            dt("2024-03-09T00:00")
        );
    }

    #[test]
    fn rfc3339_is_converted_to_local_time() {
        let parsed = parse_timestamp("start", "2024-03-09T10:15:00Z").unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-03-09T10:15:00Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn malformed_start_is_rejected() {
        let err = Event::try_from(record("a", "next tuesday")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedTimestamp { field: "start", .. }
        ));
    }

    #[test]
    fn malformed_end_is_rejected() {
        let mut r = record("a", "2024-03-09T10:00");
        r.end = Some("soon".to_string());
        let err = Event::try_from(r).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MalformedTimestamp { field: "end", .. }
        ));
    }

    #[test]
    fn events_from_records_skips_bad_rows_and_keeps_order() {
        let records = vec![
            record("a", "2024-03-09T10:00"),
            record("b", "not a date"),
            record("", "2024-03-09T11:00"),
            record("c", "2024-03-08T09:00"),
        ];
        let events = events_from_records(records);
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn unknown_category_and_bad_color_fall_back() {
        let mut r = record("a", "2024-03-09T10:00");
        r.category = Some("anniversary".to_string());
        r.color = Some("#f00".to_string());
        r.kind = Some("festival".to_string());

        let events = events_from_records(vec![r]);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.category, Category::Custom);
        assert_eq!(event.color, None);
        assert_eq!(event.kind, EventKind::Simple);
        assert_eq!(event.display_color(), color_for(Category::Custom));
    }

    #[test]
    fn record_fields_map_onto_event() {
        let json = r##"{
            "id": "bday",
            "title": "Grandma",
            "start": "2024-03-09",
            "allDay": true,
            "category": "birthday",
            "color": "#ff0000",
            "kind": "major_event"
        }"##;
        let record: EventRecord = serde_json::from_str(json).unwrap();
        let event = Event::try_from(record).unwrap();
        assert!(event.all_day);
        assert_eq!(event.category, Category::Birthday);
        assert_eq!(event.display_color(), Color::rgb(0xff, 0, 0));
        assert!(event.is_major());
    }

    #[test]
    fn display_color_falls_back_to_category() {
        let event = Event::new(EventId::new("x").unwrap(), "Dinner", dt("2024-03-09T18:00"))
            .with_category(Category::Meal);
        assert_eq!(event.display_color(), color_for(Category::Meal));
    }

    #[test]
    fn effective_end_defaults_to_one_hour() {
        let event = Event::new(EventId::new("x").unwrap(), "Call", dt("2024-03-09T23:30"));
        assert_eq!(event.effective_end(), dt("2024-03-10T00:30"));
        assert_eq!(event.day_key(), dt("2024-03-09T00:00").date());
    }
}
