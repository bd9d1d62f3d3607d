//! Handlers for `/people` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/people`     | All people, insertion order |
//! | `POST`   | `/people`     | Body: [`NewPerson`]; returns 201 + stored person |
//! | `GET`    | `/people/:id` | 404 if not found |
//! | `PUT`    | `/people/:id` | Body: [`PersonPatch`]; absent fields untouched |
//! | `DELETE` | `/people/:id` | 204; also removes the person's connections |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use whatsnext_core::{
  EntityKind, PersonId,
  person::{NewPerson, Person, PersonPatch},
  store::GraphStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: GraphStore,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  Ok(Json(snapshot.people))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError>
where
  S: GraphStore,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  let person = snapshot
    .people
    .into_iter()
    .find(|p| p.id == id)
    .ok_or_else(|| whatsnext_core::Error::not_found(EntityKind::Person, &id))?;
  Ok(Json(person))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people`: returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GraphStore,
{
  let Json(input) = body?;
  let person = store.add_person(input).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /people/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
  body: Result<Json<PersonPatch>, JsonRejection>,
) -> Result<Json<Person>, ApiError>
where
  S: GraphStore,
{
  let Json(patch) = body?;
  let person = store
    .update_person(id, patch)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(person))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/:id`: 204 on success.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<StatusCode, ApiError>
where
  S: GraphStore,
{
  store.delete_person(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
