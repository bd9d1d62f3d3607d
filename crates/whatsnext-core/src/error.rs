//! Error types for `whatsnext-core`.
//!
//! Every rejection a store can produce falls into one of three kinds; see
//! [`ErrorKind`]. Backends wrap these in their own error types and expose them
//! again through [`StoreError::rejection`].

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Which collection an id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  Person,
  Event,
  Connection,
}

/// The three ways a store operation can be rejected.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  /// Malformed or illegal input.
  Validation,
  /// A referenced id does not exist.
  NotFound,
  /// The operation would break a uniqueness invariant.
  Conflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{0}")]
  Validation(String),

  #[error("{entity} not found: {id}")]
  NotFound { entity: EntityKind, id: String },

  #[error("{0}")]
  Conflict(String),
}

impl Error {
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }

  pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
    Self::NotFound { entity, id: id.to_string() }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) => ErrorKind::Validation,
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::Conflict(_) => ErrorKind::Conflict,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by backend error types so that higher layers can tell a domain
/// rejection apart from an infrastructure failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain rejection carried by this error, or `None` if the backend
  /// itself failed.
  fn rejection(&self) -> Option<&Error>;
}

impl StoreError for Error {
  fn rejection(&self) -> Option<&Error> { Some(self) }
}
