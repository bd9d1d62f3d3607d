//! [`SqliteStore`]: the SQLite implementation of [`GraphStore`].

use std::path::Path;

use rusqlite::Transaction;
use tracing::info;
use whatsnext_core::{
  ConnectionId, EventId, PersonId,
  connection::{Connection, NewConnection},
  event::{Event, EventPatch, NewEvent},
  person::{NewPerson, Person, PersonPatch},
  store::{GraphStore, Snapshot},
};

use crate::{Error, Result, ops, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A graph store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_owned();
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    info!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `op` inside one transaction on the connection thread. The
  /// transaction commits only if `op` succeeds; otherwise it is rolled back
  /// on drop.
  async fn transact<T, F>(&self, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let out = op(&tx);
        if out.is_ok() {
          tx.commit()?;
        }
        Ok(out)
      })
      .await?
  }
}

// ─── GraphStore impl ─────────────────────────────────────────────────────────

impl GraphStore for SqliteStore {
  type Error = Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    self.transact(move |tx| ops::add_person(tx, input)).await
  }

  async fn update_person(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> Result<Person> {
    self
      .transact(move |tx| ops::update_person(tx, &id, patch))
      .await
  }

  async fn delete_person(&self, id: PersonId) -> Result<()> {
    self.transact(move |tx| ops::delete_person(tx, &id)).await
  }

  // ── Events ────────────────────────────────────────────────────────────────

  async fn add_event(&self, input: NewEvent) -> Result<Event> {
    self.transact(move |tx| ops::add_event(tx, input)).await
  }

  async fn update_event(&self, id: EventId, patch: EventPatch) -> Result<Event> {
    self
      .transact(move |tx| ops::update_event(tx, &id, patch))
      .await
  }

  async fn delete_event(&self, id: EventId) -> Result<()> {
    self.transact(move |tx| ops::delete_event(tx, &id)).await
  }

  // ── Connections ───────────────────────────────────────────────────────────

  async fn add_connection(&self, input: NewConnection) -> Result<Connection> {
    self.transact(move |tx| ops::add_connection(tx, input)).await
  }

  async fn delete_connection(&self, id: ConnectionId) -> Result<()> {
    self
      .transact(move |tx| ops::delete_connection(tx, &id))
      .await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn snapshot(&self) -> Result<Snapshot> {
    self.transact(ops::snapshot).await
  }
}
