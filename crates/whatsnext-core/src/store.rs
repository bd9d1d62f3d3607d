//! The `GraphStore` trait and the snapshot read model.
//!
//! The trait is implemented by storage backends (`whatsnext-store-memory`,
//! `whatsnext-store-sqlite`). Higher layers (`whatsnext-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  ConnectionId, EventId, PersonId, StoreError,
  connection::{Connection, NewConnection},
  event::{Event, EventPatch, NewEvent},
  person::{NewPerson, Person, PersonPatch},
};

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// The full contents of a store at one instant, each collection in insertion
/// order. This is the only read path a store offers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub people:      Vec<Person>,
  pub events:      Vec<Event>,
  pub connections: Vec<Connection>,
}

impl Snapshot {
  pub fn person(&self, id: &PersonId) -> Option<&Person> {
    self.people.iter().find(|p| &p.id == id)
  }

  pub fn event(&self, id: &EventId) -> Option<&Event> {
    self.events.iter().find(|e| &e.id == id)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a graph store backend.
///
/// Every operation is atomic with respect to the whole store: it either
/// commits completely, cascades included, or fails and changes nothing. After
/// any operation the following hold:
///
/// - every connection's endpoints exist;
/// - at most one connection exists per unordered pair of people;
/// - no connection joins a person to themselves;
/// - every non-null `event_id` names an existing event.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GraphStore: Send + Sync {
  type Error: StoreError;

  // ── People ────────────────────────────────────────────────────────────

  /// Validate and insert a new person under a freshly minted id.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Merge `patch` over the stored person and stamp `updated_at`.
  fn update_person(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Remove a person together with every connection it is an endpoint of.
  fn delete_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Events ────────────────────────────────────────────────────────────

  fn add_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  fn update_event(
    &self,
    id: EventId,
    patch: EventPatch,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// Remove an event and null out every person's and connection's reference
  /// to it. Nothing else is deleted.
  fn delete_event(
    &self,
    id: EventId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Connections ───────────────────────────────────────────────────────

  /// Insert a connection keyed by [`crate::pair_key`] of its endpoints.
  ///
  /// Rejections, checked in this order: self-connection or blank endpoint
  /// (validation), unknown endpoint or event (not found), existing connection
  /// for the pair (conflict).
  fn add_connection(
    &self,
    input: NewConnection,
  ) -> impl Future<Output = Result<Connection, Self::Error>> + Send + '_;

  fn delete_connection(
    &self,
    id: ConnectionId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;
}
