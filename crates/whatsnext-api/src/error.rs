//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body has the same shape:
//! `{"kind": "validation" | "not_found" | "conflict" | "internal", "error": "..."}`.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use whatsnext_core::{ErrorKind, StoreError};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A domain rejection; the body carries the core [`ErrorKind`] verbatim.
  #[error("{message}")]
  Rejected { kind: ErrorKind, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Rejected { kind: ErrorKind::Validation, message: message.into() }
  }

  /// Classify a backend error: domain rejections keep their kind, anything
  /// else is an internal failure.
  pub fn store<E: StoreError>(e: E) -> Self {
    if let Some(rejection) = e.rejection() {
      return rejection.clone().into();
    }
    Self::Store(Box::new(e))
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::Rejected { kind, .. } => (*kind).into(),
      Self::Store(_) => "internal",
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::Rejected { kind: ErrorKind::Validation, .. } => {
        StatusCode::BAD_REQUEST
      }
      Self::Rejected { kind: ErrorKind::NotFound, .. } => StatusCode::NOT_FOUND,
      Self::Rejected { kind: ErrorKind::Conflict, .. } => StatusCode::CONFLICT,
      Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<whatsnext_core::Error> for ApiError {
  fn from(e: whatsnext_core::Error) -> Self {
    Self::Rejected { kind: e.kind(), message: e.to_string() }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self { Self::validation(e.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(e: QueryRejection) -> Self { Self::validation(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if let Self::Store(e) = &self {
      tracing::error!(error = %e, "store failure");
    }
    let body = json!({ "kind": self.kind(), "error": self.to_string() });
    (status, Json(body)).into_response()
  }
}
