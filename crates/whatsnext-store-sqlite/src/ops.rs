//! Transaction bodies for each store operation.
//!
//! Every function here runs on the connection thread against an open
//! transaction and checks all of its preconditions before writing. The
//! caller commits only on `Ok`.

use chrono::Utc;
use rusqlite::{OptionalExtension as _, Transaction, params};
use tracing::{debug, info};
use whatsnext_core::{
  ConnectionId, EntityKind, EventId, PersonId,
  connection::{Connection, NewConnection},
  event::{Event, EventPatch, NewEvent},
  person::{NewPerson, Person, PersonPatch},
  store::Snapshot,
};

use crate::{
  Result,
  encode::{
    CONNECTION_COLUMNS, EVENT_COLUMNS, PERSON_COLUMNS, RawConnection,
    RawEvent, RawPerson, encode_dt, encode_event_date, encode_list,
  },
};

type CoreError = whatsnext_core::Error;

// ─── People ──────────────────────────────────────────────────────────────────

pub fn add_person(tx: &Transaction<'_>, input: NewPerson) -> Result<Person> {
  input.validate()?;
  require_event(tx, input.event_ref())?;

  let person = input.into_person(PersonId::generate(), Utc::now());
  tx.execute(
    "INSERT INTO people (
       person_id, name, email, phone, profession, company, location, notes,
       tags, event_id, created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    params![
      person.id.as_str(),
      person.name,
      person.email,
      person.phone,
      person.profession,
      person.company,
      person.location,
      person.notes,
      encode_list(&person.tags)?,
      person.event_id.as_ref().map(EventId::as_str),
      encode_dt(person.created_at),
      person.updated_at.map(encode_dt),
    ],
  )?;
  debug!(id = %person.id, name = %person.name, "added person");
  Ok(person)
}

pub fn update_person(
  tx: &Transaction<'_>,
  id: &PersonId,
  patch: PersonPatch,
) -> Result<Person> {
  patch.validate()?;
  let mut person = load_person(tx, id)?
    .ok_or_else(|| CoreError::not_found(EntityKind::Person, id))?;
  require_event(tx, patch.event_ref())?;

  patch.apply(&mut person, Utc::now());
  tx.execute(
    "UPDATE people SET
       name = ?2, email = ?3, phone = ?4, profession = ?5, company = ?6,
       location = ?7, notes = ?8, tags = ?9, event_id = ?10, updated_at = ?11
     WHERE person_id = ?1",
    params![
      person.id.as_str(),
      person.name,
      person.email,
      person.phone,
      person.profession,
      person.company,
      person.location,
      person.notes,
      encode_list(&person.tags)?,
      person.event_id.as_ref().map(EventId::as_str),
      person.updated_at.map(encode_dt),
    ],
  )?;
  debug!(%id, "updated person");
  Ok(person)
}

/// Connections touching the person go with it via `ON DELETE CASCADE`.
pub fn delete_person(tx: &Transaction<'_>, id: &PersonId) -> Result<()> {
  let touching: i64 = tx.query_row(
    "SELECT COUNT(*) FROM connections WHERE from_id = ?1 OR to_id = ?1",
    params![id.as_str()],
    |r| r.get(0),
  )?;
  let deleted =
    tx.execute("DELETE FROM people WHERE person_id = ?1", params![id.as_str()])?;
  if deleted == 0 {
    return Err(CoreError::not_found(EntityKind::Person, id).into());
  }
  info!(%id, removed_connections = touching, "deleted person");
  Ok(())
}

// ─── Events ──────────────────────────────────────────────────────────────────

pub fn add_event(tx: &Transaction<'_>, input: NewEvent) -> Result<Event> {
  input.validate()?;

  let event = input.into_event(EventId::generate(), Utc::now());
  tx.execute(
    "INSERT INTO events (
       event_id, name, date, location, description, attendees,
       created_at, updated_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      event.id.as_str(),
      event.name,
      encode_event_date(event.date),
      event.location,
      event.description,
      encode_list(&event.attendees)?,
      encode_dt(event.created_at),
      event.updated_at.map(encode_dt),
    ],
  )?;
  debug!(id = %event.id, name = %event.name, "added event");
  Ok(event)
}

pub fn update_event(
  tx: &Transaction<'_>,
  id: &EventId,
  patch: EventPatch,
) -> Result<Event> {
  patch.validate()?;
  let mut event = load_event(tx, id)?
    .ok_or_else(|| CoreError::not_found(EntityKind::Event, id))?;

  patch.apply(&mut event, Utc::now());
  tx.execute(
    "UPDATE events SET
       name = ?2, date = ?3, location = ?4, description = ?5,
       attendees = ?6, updated_at = ?7
     WHERE event_id = ?1",
    params![
      event.id.as_str(),
      event.name,
      encode_event_date(event.date),
      event.location,
      event.description,
      encode_list(&event.attendees)?,
      event.updated_at.map(encode_dt),
    ],
  )?;
  debug!(%id, "updated event");
  Ok(event)
}

/// References to the event are cleared via `ON DELETE SET NULL`.
pub fn delete_event(tx: &Transaction<'_>, id: &EventId) -> Result<()> {
  let cleared_people: i64 = tx.query_row(
    "SELECT COUNT(*) FROM people WHERE event_id = ?1",
    params![id.as_str()],
    |r| r.get(0),
  )?;
  let cleared_connections: i64 = tx.query_row(
    "SELECT COUNT(*) FROM connections WHERE event_id = ?1",
    params![id.as_str()],
    |r| r.get(0),
  )?;
  let deleted =
    tx.execute("DELETE FROM events WHERE event_id = ?1", params![id.as_str()])?;
  if deleted == 0 {
    return Err(CoreError::not_found(EntityKind::Event, id).into());
  }
  info!(%id, cleared_people, cleared_connections, "deleted event");
  Ok(())
}

// ─── Connections ─────────────────────────────────────────────────────────────

pub fn add_connection(
  tx: &Transaction<'_>,
  input: NewConnection,
) -> Result<Connection> {
  input.validate()?;
  for endpoint in [&input.from, &input.to] {
    if !person_exists(tx, endpoint)? {
      return Err(CoreError::not_found(EntityKind::Person, endpoint).into());
    }
  }
  require_event(tx, input.event_ref())?;

  let key = input.key();
  let taken = tx
    .query_row(
      "SELECT 1 FROM connections WHERE connection_id = ?1",
      params![key.as_str()],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if taken {
    return Err(
      CoreError::Conflict(format!(
        "connection already exists between {} and {}",
        input.from, input.to
      ))
      .into(),
    );
  }

  let conn = input.into_connection(Utc::now());
  tx.execute(
    "INSERT INTO connections (
       connection_id, from_id, to_id, relationship_type, strength, notes,
       event_id, created_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      conn.id.as_str(),
      conn.from.as_str(),
      conn.to.as_str(),
      conn.relationship_type,
      conn.strength,
      conn.notes,
      conn.event_id.as_ref().map(EventId::as_str),
      encode_dt(conn.created_at),
    ],
  )?;
  debug!(id = %conn.id, strength = conn.strength, "added connection");
  Ok(conn)
}

pub fn delete_connection(tx: &Transaction<'_>, id: &ConnectionId) -> Result<()> {
  let deleted = tx.execute(
    "DELETE FROM connections WHERE connection_id = ?1",
    params![id.as_str()],
  )?;
  if deleted == 0 {
    return Err(CoreError::not_found(EntityKind::Connection, id).into());
  }
  debug!(%id, "deleted connection");
  Ok(())
}

// ─── Reads ───────────────────────────────────────────────────────────────────

pub fn snapshot(tx: &Transaction<'_>) -> Result<Snapshot> {
  let people = tx
    .prepare(&format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY rowid"))?
    .query_map([], RawPerson::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  let events = tx
    .prepare(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY rowid"))?
    .query_map([], RawEvent::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  let connections = tx
    .prepare(&format!(
      "SELECT {CONNECTION_COLUMNS} FROM connections ORDER BY rowid"
    ))?
    .query_map([], RawConnection::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(Snapshot {
    people:      people
      .into_iter()
      .map(RawPerson::into_person)
      .collect::<Result<_>>()?,
    events:      events
      .into_iter()
      .map(RawEvent::into_event)
      .collect::<Result<_>>()?,
    connections: connections
      .into_iter()
      .map(RawConnection::into_connection)
      .collect::<Result<_>>()?,
  })
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn load_person(tx: &Transaction<'_>, id: &PersonId) -> Result<Option<Person>> {
  tx.query_row(
    &format!("SELECT {PERSON_COLUMNS} FROM people WHERE person_id = ?1"),
    params![id.as_str()],
    RawPerson::from_row,
  )
  .optional()?
  .map(RawPerson::into_person)
  .transpose()
}

fn load_event(tx: &Transaction<'_>, id: &EventId) -> Result<Option<Event>> {
  tx.query_row(
    &format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ?1"),
    params![id.as_str()],
    RawEvent::from_row,
  )
  .optional()?
  .map(RawEvent::into_event)
  .transpose()
}

fn person_exists(tx: &Transaction<'_>, id: &PersonId) -> Result<bool> {
  Ok(
    tx.query_row(
      "SELECT 1 FROM people WHERE person_id = ?1",
      params![id.as_str()],
      |_| Ok(()),
    )
    .optional()?
    .is_some(),
  )
}

fn require_event(tx: &Transaction<'_>, id: Option<&EventId>) -> Result<()> {
  let Some(id) = id else { return Ok(()) };
  let found = tx
    .query_row(
      "SELECT 1 FROM events WHERE event_id = ?1",
      params![id.as_str()],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if !found {
    return Err(CoreError::not_found(EntityKind::Event, id).into());
  }
  Ok(())
}
