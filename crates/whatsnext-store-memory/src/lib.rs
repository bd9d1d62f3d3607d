//! In-memory backend for the whats-next graph store.
//!
//! [`Graph`] is the synchronous store proper: it owns the three collections
//! and enforces every invariant. [`MemoryStore`] shares one `Graph` behind a
//! readers/writer lock so it can serve concurrent requests.

mod graph;
mod store;

pub use graph::Graph;
pub use store::MemoryStore;
pub use whatsnext_core::{Error, Result};
