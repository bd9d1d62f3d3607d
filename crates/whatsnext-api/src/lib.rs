//! JSON REST API for What's Next.
//!
//! Exposes an axum [`Router`] backed by any
//! [`whatsnext_core::store::GraphStore`]. TLS, CORS, and request tracing are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", whatsnext_api::api_router(store.clone()))
//! ```

pub mod connections;
pub mod error;
pub mod events;
pub mod graph;
pub mod people;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use whatsnext_core::store::GraphStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: GraphStore + 'static,
{
  Router::new()
    // Graph
    .route("/graph", get(graph::snapshot::<S>))
    .route("/graph/nodes", get(graph::nodes::<S>))
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete::<S>),
    )
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route(
      "/events/{id}",
      get(events::get_one::<S>)
        .put(events::update::<S>)
        .delete(events::delete::<S>),
    )
    // Connections
    .route(
      "/connections",
      get(connections::list::<S>).post(connections::create::<S>),
    )
    .route("/connections/{id}", delete(connections::delete::<S>))
    .with_state(store)
}
