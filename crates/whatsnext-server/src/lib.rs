//! HTTP server assembly for What's Next.
//!
//! Mounts [`whatsnext_api::api_router`] under `/api` and wraps it in request
//! tracing and, optionally, permissive CORS for a browser client served from
//! another origin.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use whatsnext_core::store::GraphStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`GraphStore`] implementation backs the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  /// Process-local; contents are lost on exit.
  #[default]
  Memory,
  /// A single SQLite file at `sqlite_path`.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `WHATSNEXT_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:        String,
  pub port:        u16,
  pub store:       StoreBackend,
  pub sqlite_path: PathBuf,
  pub cors:        bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:        "127.0.0.1".to_string(),
      port:        3001,
      store:       StoreBackend::Memory,
      sqlite_path: PathBuf::from("whats-next.db"),
      cors:        true,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: GraphStore + 'static,
{
  let router = Router::new()
    .nest("/api", whatsnext_api::api_router(store))
    .layer(TraceLayer::new_for_http());

  if config.cors {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
