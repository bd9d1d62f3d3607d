//! Handlers for `/events` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/events`     | All events, insertion order |
//! | `POST`   | `/events`     | Body: [`NewEvent`]; `date` defaults to now |
//! | `GET`    | `/events/:id` | 404 if not found |
//! | `PUT`    | `/events/:id` | Body: [`EventPatch`] |
//! | `DELETE` | `/events/:id` | 204; clears references, deletes nothing else |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use whatsnext_core::{
  EntityKind, EventId,
  event::{Event, EventPatch, NewEvent},
  store::GraphStore,
};

use crate::error::ApiError;

/// `GET /events`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Event>>, ApiError>
where
  S: GraphStore,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  Ok(Json(snapshot.events))
}

/// `GET /events/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<EventId>,
) -> Result<Json<Event>, ApiError>
where
  S: GraphStore,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  let event = snapshot
    .events
    .into_iter()
    .find(|e| e.id == id)
    .ok_or_else(|| whatsnext_core::Error::not_found(EntityKind::Event, &id))?;
  Ok(Json(event))
}

/// `POST /events`: returns 201 + the stored [`Event`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewEvent>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GraphStore,
{
  let Json(input) = body?;
  let event = store.add_event(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(event)))
}

/// `PUT /events/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<EventId>,
  body: Result<Json<EventPatch>, JsonRejection>,
) -> Result<Json<Event>, ApiError>
where
  S: GraphStore,
{
  let Json(patch) = body?;
  let event = store
    .update_event(id, patch)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(event))
}

/// `DELETE /events/:id`: 204 on success.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<EventId>,
) -> Result<StatusCode, ApiError>
where
  S: GraphStore,
{
  store.delete_event(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
