//! [`Graph`]: owned collections plus the cascade rules that keep them
//! consistent.

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info};
use whatsnext_core::{
  ConnectionId, EntityKind, Error, EventId, PersonId, Result,
  connection::{Connection, NewConnection},
  event::{Event, EventPatch, NewEvent},
  person::{NewPerson, Person, PersonPatch},
  store::Snapshot,
};

/// A self-contained graph of people, events and connections.
///
/// Every method runs to completion, cascades included, before returning, and
/// checks all of its preconditions before touching any collection. A failed
/// call therefore leaves the graph exactly as it found it.
#[derive(Debug, Clone, Default)]
pub struct Graph {
  people:      IndexMap<PersonId, Person>,
  events:      IndexMap<EventId, Event>,
  connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
  pub fn new() -> Self { Self::default() }

  // ── People ────────────────────────────────────────────────────────────

  pub fn add_person(&mut self, input: NewPerson) -> Result<Person> {
    input.validate()?;
    self.require_event(input.event_ref())?;

    let id = loop {
      let id = PersonId::generate();
      if !self.people.contains_key(&id) {
        break id;
      }
    };
    let person = input.into_person(id, Utc::now());
    debug!(id = %person.id, name = %person.name, "added person");
    self.people.insert(person.id.clone(), person.clone());
    Ok(person)
  }

  pub fn update_person(
    &mut self,
    id: &PersonId,
    patch: PersonPatch,
  ) -> Result<Person> {
    patch.validate()?;
    if !self.people.contains_key(id) {
      return Err(Error::not_found(EntityKind::Person, id));
    }
    self.require_event(patch.event_ref())?;

    let person = self
      .people
      .get_mut(id)
      .ok_or_else(|| Error::not_found(EntityKind::Person, id))?;
    patch.apply(person, Utc::now());
    debug!(%id, "updated person");
    Ok(person.clone())
  }

  /// Removes the person and, in the same step, every connection touching it.
  pub fn delete_person(&mut self, id: &PersonId) -> Result<()> {
    if self.people.shift_remove(id).is_none() {
      return Err(Error::not_found(EntityKind::Person, id));
    }
    let before = self.connections.len();
    self.connections.retain(|_, c| !c.touches(id));
    let removed = before - self.connections.len();

    info!(%id, removed_connections = removed, "deleted person");
    Ok(())
  }

  // ── Events ────────────────────────────────────────────────────────────

  pub fn add_event(&mut self, input: NewEvent) -> Result<Event> {
    input.validate()?;

    let id = loop {
      let id = EventId::generate();
      if !self.events.contains_key(&id) {
        break id;
      }
    };
    let event = input.into_event(id, Utc::now());
    debug!(id = %event.id, name = %event.name, "added event");
    self.events.insert(event.id.clone(), event.clone());
    Ok(event)
  }

  pub fn update_event(
    &mut self,
    id: &EventId,
    patch: EventPatch,
  ) -> Result<Event> {
    patch.validate()?;
    let event = self
      .events
      .get_mut(id)
      .ok_or_else(|| Error::not_found(EntityKind::Event, id))?;
    patch.apply(event, Utc::now());
    debug!(%id, "updated event");
    Ok(event.clone())
  }

  /// Removes the event and clears every reference to it. People and
  /// connections themselves survive.
  pub fn delete_event(&mut self, id: &EventId) -> Result<()> {
    if self.events.shift_remove(id).is_none() {
      return Err(Error::not_found(EntityKind::Event, id));
    }

    let mut cleared_people = 0usize;
    for person in self.people.values_mut() {
      if person.event_id.as_ref() == Some(id) {
        person.event_id = None;
        cleared_people += 1;
      }
    }
    let mut cleared_connections = 0usize;
    for conn in self.connections.values_mut() {
      if conn.event_id.as_ref() == Some(id) {
        conn.event_id = None;
        cleared_connections += 1;
      }
    }

    info!(
      %id,
      cleared_people,
      cleared_connections,
      "deleted event"
    );
    Ok(())
  }

  // ── Connections ───────────────────────────────────────────────────────

  pub fn add_connection(&mut self, input: NewConnection) -> Result<Connection> {
    input.validate()?;
    for endpoint in [&input.from, &input.to] {
      if !self.people.contains_key(endpoint) {
        return Err(Error::not_found(EntityKind::Person, endpoint));
      }
    }
    self.require_event(input.event_ref())?;

    let key = input.key();
    if self.connections.contains_key(&key) {
      return Err(Error::Conflict(format!(
        "connection already exists between {} and {}",
        input.from, input.to
      )));
    }

    let conn = input.into_connection(Utc::now());
    debug!(id = %conn.id, strength = conn.strength, "added connection");
    self.connections.insert(key, conn.clone());
    Ok(conn)
  }

  pub fn delete_connection(&mut self, id: &ConnectionId) -> Result<()> {
    self
      .connections
      .shift_remove(id)
      .ok_or_else(|| Error::not_found(EntityKind::Connection, id))?;
    debug!(%id, "deleted connection");
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      people:      self.people.values().cloned().collect(),
      events:      self.events.values().cloned().collect(),
      connections: self.connections.values().cloned().collect(),
    }
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  fn require_event(&self, id: Option<&EventId>) -> Result<()> {
    match id {
      Some(id) if !self.events.contains_key(id) => {
        Err(Error::not_found(EntityKind::Event, id))
      }
      _ => Ok(()),
    }
  }
}
