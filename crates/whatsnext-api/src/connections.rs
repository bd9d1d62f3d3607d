//! Handlers for `/connections` endpoints.
//!
//! | Method   | Path               | Notes |
//! |----------|--------------------|-------|
//! | `GET`    | `/connections`     | All connections, insertion order |
//! | `POST`   | `/connections`     | Body: [`NewConnection`]; 400 self, 404 missing person, 409 duplicate |
//! | `DELETE` | `/connections/:id` | `:id` is the pair key; 204 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use whatsnext_core::{
  ConnectionId,
  connection::{Connection, NewConnection},
  store::GraphStore,
};

use crate::error::ApiError;

/// `GET /connections`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Connection>>, ApiError>
where
  S: GraphStore,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  Ok(Json(snapshot.connections))
}

/// `POST /connections`: returns 201 + the stored [`Connection`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewConnection>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GraphStore,
{
  let Json(input) = body?;
  let connection = store
    .add_connection(input)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(connection)))
}

/// `DELETE /connections/:id`: 204 on success.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ConnectionId>,
) -> Result<StatusCode, ApiError>
where
  S: GraphStore,
{
  store.delete_connection(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
