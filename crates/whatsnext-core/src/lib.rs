//! Core types and trait definitions for the whats-next knowledge graph.
//!
//! Entity records, their create and patch inputs, the error taxonomy, and the
//! [`store::GraphStore`] contract. No HTTP or database code lives here.

// Store impls use native `async fn`; the trait spells out the `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod connection;
pub mod error;
pub mod event;
pub mod id;
pub mod patch;
pub mod person;
pub mod store;

pub use error::{EntityKind, Error, ErrorKind, Result, StoreError};
pub use id::{ConnectionId, EventId, PersonId, pair_key};
