//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings. Event dates use their own `Display` form.
//! Tag and attendee lists are compact JSON arrays.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Serialize, de::DeserializeOwned};
use whatsnext_core::{
  connection::Connection,
  event::{Event, EventDate},
  person::Person,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<DateTime<Utc>>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── EventDate ───────────────────────────────────────────────────────────────

pub fn encode_event_date(d: Option<EventDate>) -> Option<String> {
  d.map(|d| d.to_string())
}

fn decode_event_date(s: &str) -> Result<EventDate> {
  s.parse()
    .map_err(|e: whatsnext_core::Error| Error::DateParse(e.to_string()))
}

// ─── Lists ───────────────────────────────────────────────────────────────────

pub fn encode_list<T: Serialize>(items: &[T]) -> Result<String> {
  Ok(serde_json::to_string(items)?)
}

fn decode_list<T: DeserializeOwned>(s: &str) -> Result<Vec<T>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PERSON_COLUMNS: &str = "person_id, name, email, phone, profession, \
                                  company, location, notes, tags, event_id, \
                                  created_at, updated_at";

/// Raw values read directly from a `people` row.
pub struct RawPerson {
  pub person_id:  String,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub profession: String,
  pub company:    String,
  pub location:   String,
  pub notes:      String,
  pub tags:       String,
  pub event_id:   Option<String>,
  pub created_at: String,
  pub updated_at: Option<String>,
}

impl RawPerson {
  /// Column order follows [`PERSON_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:  row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      profession: row.get(4)?,
      company:    row.get(5)?,
      location:   row.get(6)?,
      notes:      row.get(7)?,
      tags:       row.get(8)?,
      event_id:   row.get(9)?,
      created_at: row.get(10)?,
      updated_at: row.get(11)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         self.person_id.into(),
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      profession: self.profession,
      company:    self.company,
      location:   self.location,
      notes:      self.notes,
      tags:       decode_list(&self.tags)?,
      event_id:   self.event_id.map(Into::into),
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_opt_dt(self.updated_at)?,
    })
  }
}

pub const EVENT_COLUMNS: &str = "event_id, name, date, location, description, \
                                 attendees, created_at, updated_at";

/// Raw values read directly from an `events` row.
pub struct RawEvent {
  pub event_id:    String,
  pub name:        String,
  pub date:        Option<String>,
  pub location:    String,
  pub description: String,
  pub attendees:   String,
  pub created_at:  String,
  pub updated_at:  Option<String>,
}

impl RawEvent {
  /// Column order follows [`EVENT_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:    row.get(0)?,
      name:        row.get(1)?,
      date:        row.get(2)?,
      location:    row.get(3)?,
      description: row.get(4)?,
      attendees:   row.get(5)?,
      created_at:  row.get(6)?,
      updated_at:  row.get(7)?,
    })
  }

  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:          self.event_id.into(),
      name:        self.name,
      date:        self.date.as_deref().map(decode_event_date).transpose()?,
      location:    self.location,
      description: self.description,
      attendees:   decode_list(&self.attendees)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_opt_dt(self.updated_at)?,
    })
  }
}

pub const CONNECTION_COLUMNS: &str = "connection_id, from_id, to_id, \
                                      relationship_type, strength, notes, \
                                      event_id, created_at";

/// Raw values read directly from a `connections` row.
pub struct RawConnection {
  pub connection_id:     String,
  pub from_id:           String,
  pub to_id:             String,
  pub relationship_type: String,
  pub strength:          u8,
  pub notes:             String,
  pub event_id:          Option<String>,
  pub created_at:        String,
}

impl RawConnection {
  /// Column order follows [`CONNECTION_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      connection_id:     row.get(0)?,
      from_id:           row.get(1)?,
      to_id:             row.get(2)?,
      relationship_type: row.get(3)?,
      strength:          row.get(4)?,
      notes:             row.get(5)?,
      event_id:          row.get(6)?,
      created_at:        row.get(7)?,
    })
  }

  pub fn into_connection(self) -> Result<Connection> {
    Ok(Connection {
      id:                self.connection_id.into(),
      from:              self.from_id.into(),
      to:                self.to_id.into(),
      relationship_type: self.relationship_type,
      strength:          self.strength,
      notes:             self.notes,
      event_id:          self.event_id.map(Into::into),
      created_at:        decode_dt(&self.created_at)?,
    })
  }
}
