//! Error type for `whatsnext-store-sqlite`.

use thiserror::Error;
use whatsnext_core::StoreError;

#[derive(Debug, Error)]
pub enum Error {
  /// The operation was refused; nothing was written.
  #[error(transparent)]
  Core(#[from] whatsnext_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn rejection(&self) -> Option<&whatsnext_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
