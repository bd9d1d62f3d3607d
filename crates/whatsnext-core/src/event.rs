//! Events: the places and occasions at which people meet.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{
  EventId, PersonId, Result,
  error::Error,
  patch::{apply_text, non_blank, nullable},
};

// ─── Temporal ────────────────────────────────────────────────────────────────

/// When an event happens. Serialised as a bare string in either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventDate {
  /// A specific moment, RFC 3339.
  Instant(DateTime<Utc>),
  /// A calendar day, `YYYY-MM-DD`.
  Day(NaiveDate),
}

impl fmt::Display for EventDate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Instant(dt) => f.write_str(&dt.to_rfc3339()),
      Self::Day(d) => write!(f, "{}", d.format("%Y-%m-%d")),
    }
  }
}

impl FromStr for EventDate {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
      return Ok(Self::Instant(dt.with_timezone(&Utc)));
    }
    // `datetime-local` form input carries no offset; read it as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
      if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
        return Ok(Self::Instant(naive.and_utc()));
      }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Self::Day)
      .map_err(|_| Error::validation(format!("invalid event date: {s:?}")))
  }
}

/// Reads an optional date string. A blank string counts as no date.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<EventDate>, D::Error>
where
  D: Deserializer<'de>,
{
  let Some(raw) = Option::<String>::deserialize(deserializer)? else {
    return Ok(None);
  };
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  raw.parse().map(Some).map_err(de::Error::custom)
}

/// Patch form of [`lenient_date`]: blank clears the date just like `null`.
fn nullable_lenient_date<'de, D>(
  deserializer: D,
) -> Result<Option<Option<EventDate>>, D::Error>
where
  D: Deserializer<'de>,
{
  lenient_date(deserializer).map(Some)
}

// ─── Event ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  pub id:          EventId,
  pub name:        String,
  pub date:        Option<EventDate>,
  pub location:    String,
  pub description: String,
  /// Informational only; never checked against people or connections.
  pub attendees:   Vec<PersonId>,
  pub created_at:  DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at:  Option<DateTime<Utc>>,
}

// ─── NewEvent ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::GraphStore::add_event`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
  #[serde(default)]
  pub name:        String,
  /// Defaults to the creation instant. Blank reads as absent.
  #[serde(default, deserialize_with = "lenient_date")]
  pub date:        Option<EventDate>,
  pub location:    Option<String>,
  pub description: Option<String>,
}

impl NewEvent {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::validation("name is required"));
    }
    Ok(())
  }

  /// Callers must have run [`Self::validate`] first.
  pub fn into_event(self, id: EventId, now: DateTime<Utc>) -> Event {
    Event {
      id,
      name: self.name,
      date: Some(self.date.unwrap_or(EventDate::Instant(now))),
      location: self.location.unwrap_or_default(),
      description: self.description.unwrap_or_default(),
      attendees: Vec::new(),
      created_at: now,
      updated_at: None,
    }
  }
}

// ─── EventPatch ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::GraphStore::update_event`]. Same absent / `null`
/// / value rules as [`crate::person::PersonPatch`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
  pub name:        Option<String>,
  #[serde(default, deserialize_with = "nullable_lenient_date")]
  pub date:        Option<Option<EventDate>>,
  #[serde(default, deserialize_with = "nullable")]
  pub location:    Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub description: Option<Option<String>>,
  /// Replaces the attendee list wholesale.
  #[serde(default, deserialize_with = "nullable")]
  pub attendees:   Option<Option<Vec<PersonId>>>,
}

impl EventPatch {
  pub fn validate(&self) -> Result<()> {
    if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(Error::validation("name cannot be blank"));
    }
    Ok(())
  }

  /// Callers must have run [`Self::validate`] first.
  pub fn apply(self, event: &mut Event, now: DateTime<Utc>) {
    if let Some(name) = non_blank(self.name) {
      event.name = name;
    }
    if let Some(date) = self.date {
      event.date = date;
    }
    apply_text(&mut event.location, self.location);
    apply_text(&mut event.description, self.description);
    if let Some(attendees) = self.attendees {
      event.attendees = attendees.unwrap_or_default();
    }
    event.updated_at = Some(now);
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn date_defaults_to_creation_instant() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let e = NewEvent::new("Conf2024").into_event(EventId::from("e1"), now);
    assert_eq!(e.date, Some(EventDate::Instant(now)));
    assert!(e.attendees.is_empty());
  }

  #[test]
  fn date_accepts_day_or_instant() {
    let day: EventDate = serde_json::from_str(r#""2024-05-01""#).unwrap();
    assert_eq!(day, EventDate::Day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));

    let instant: EventDate =
      serde_json::from_str(r#""2024-05-01T09:30:00Z""#).unwrap();
    assert!(matches!(instant, EventDate::Instant(_)));
  }

  #[test]
  fn date_display_parses_back() {
    for raw in ["2024-05-01", "2024-05-01T09:30:00+00:00"] {
      let date: EventDate = raw.parse().unwrap();
      assert_eq!(date.to_string(), raw);
    }
    assert!("next tuesday".parse::<EventDate>().is_err());
  }

  #[test]
  fn offsetless_datetime_reads_as_utc() {
    let expected = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    for raw in ["2024-05-01T09:30", "2024-05-01T09:30:00"] {
      let date: EventDate = raw.parse().unwrap();
      assert_eq!(date, EventDate::Instant(expected));
    }
  }

  #[test]
  fn blank_form_date_is_absent() {
    let input: NewEvent =
      serde_json::from_str(r#"{"name":"Meetup","date":"","location":""}"#)
        .unwrap();
    assert_eq!(input.date, None);

    let input: NewEvent =
      serde_json::from_str(r#"{"name":"Meetup","date":"2024-05-01T09:30"}"#)
        .unwrap();
    assert!(matches!(input.date, Some(EventDate::Instant(_))));

    let err = serde_json::from_str::<NewEvent>(r#"{"name":"x","date":"soon"}"#);
    assert!(err.is_err());
  }

  #[test]
  fn patch_blank_date_clears_like_null() {
    let absent: EventPatch = serde_json::from_str("{}").unwrap();
    let blank: EventPatch = serde_json::from_str(r#"{"date":"  "}"#).unwrap();
    let null: EventPatch = serde_json::from_str(r#"{"date":null}"#).unwrap();
    assert_eq!(absent.date, None);
    assert_eq!(blank.date, Some(None));
    assert_eq!(null.date, Some(None));
  }

  #[test]
  fn patch_replaces_attendees_and_clears_date() {
    let mut e =
      NewEvent::new("Meetup").into_event(EventId::from("e1"), Utc::now());
    let patch: EventPatch =
      serde_json::from_str(r#"{"date":null,"attendees":["p1","p2"]}"#).unwrap();
    patch.apply(&mut e, Utc::now());

    assert_eq!(e.name, "Meetup");
    assert_eq!(e.date, None);
    assert_eq!(e.attendees, [PersonId::from("p1"), PersonId::from("p2")]);
  }
}
