//! [`MemoryStore`]: the in-memory implementation of [`GraphStore`].

use std::sync::Arc;

use tokio::sync::RwLock;
use whatsnext_core::{
  ConnectionId, EventId, PersonId,
  connection::{Connection, NewConnection},
  event::{Event, EventPatch, NewEvent},
  person::{NewPerson, Person, PersonPatch},
  store::{GraphStore, Snapshot},
};

use crate::{Graph, Result};

/// A shared handle to one [`Graph`].
///
/// Cloning is cheap; clones see the same graph. Writers take the lock
/// exclusively for the whole operation, cascade included, so a reader can
/// never observe a half-applied delete.
#[derive(Clone, Default)]
pub struct MemoryStore {
  graph: Arc<RwLock<Graph>>,
}

impl MemoryStore {
  /// An empty store.
  pub fn new() -> Self { Self::default() }

  /// Wrap an existing graph, e.g. one seeded by a test.
  pub fn from_graph(graph: Graph) -> Self {
    Self { graph: Arc::new(RwLock::new(graph)) }
  }
}

impl GraphStore for MemoryStore {
  type Error = whatsnext_core::Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    self.graph.write().await.add_person(input)
  }

  async fn update_person(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> Result<Person> {
    self.graph.write().await.update_person(&id, patch)
  }

  async fn delete_person(&self, id: PersonId) -> Result<()> {
    self.graph.write().await.delete_person(&id)
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    self.graph.write().await.add_event(input)
  }

  async fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Event> {
    self.graph.write().await.update_event(&id, patch)
  }

  async fn delete_event(&self, id: EventId) -> Result<()> {
    self.graph.write().await.delete_event(&id)
  }

  // ── Connections ───────────────────────────────────────────────────────────

  async fn add_connection(&self, input: NewConnection) -> Result<Connection> {
    self.graph.write().await.add_connection(input)
  }

  async fn delete_connection(&self, id: ConnectionId) -> Result<()> {
    self.graph.write().await.delete_connection(&id)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    Ok(self.graph.read().await.snapshot())
  }
}
