use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use whatsnext_core::event::EventDate;
use whatsnext_store_memory::MemoryStore;

use crate::{api_router, error::ApiError};

fn app() -> Router { api_router(Arc::new(MemoryStore::new())) }

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

async fn create_person(app: &Router, name: &str) -> String {
  let (status, body) =
    send(app, "POST", "/people", Some(json!({ "name": name }))).await;
  assert_eq!(status, StatusCode::CREATED);
  body["id"].as_str().unwrap().to_string()
}

async fn create_event(app: &Router, name: &str) -> String {
  let (status, body) =
    send(app, "POST", "/events", Some(json!({ "name": name }))).await;
  assert_eq!(status, StatusCode::CREATED);
  body["id"].as_str().unwrap().to_string()
}

// ── Graph ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_graph_has_three_empty_collections() {
  let app = app();
  let (status, body) = send(&app, "GET", "/graph", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "people": [], "events": [], "connections": [] }));
}

#[tokio::test]
async fn graph_nodes_reflect_degree_and_options() {
  let app = app();
  let a = create_person(&app, "Alice").await;
  let b = create_person(&app, "Bob").await;
  send(&app, "POST", "/connections", Some(json!({ "from": a, "to": b }))).await;

  let (status, body) = send(
    &app,
    "GET",
    "/graph/nodes?options=--label%20false&scale=2",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let nodes = body["nodes"].as_array().unwrap();
  assert_eq!(nodes.len(), 2);
  assert!(nodes.iter().all(|n| n["label"].is_null()));
  assert_eq!(nodes[0]["fill"], "#4CAF50");
  assert_eq!(body["links"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn graph_nodes_rejects_non_positive_scale() {
  let app = app();
  let (status, body) = send(&app, "GET", "/graph/nodes?scale=0", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["kind"], "validation");

  let (status, _) = send(&app, "GET", "/graph/nodes?scale=abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test]
fn error_kind_matches_core_kind() {
  use whatsnext_core::{EntityKind, Error};

  for err in [
    Error::validation("bad"),
    Error::not_found(EntityKind::Person, "p1"),
    Error::Conflict("dup".into()),
  ] {
    let core_kind = serde_json::to_value(err.kind()).unwrap();
    let api = ApiError::from(err);
    assert_eq!(core_kind, api.kind());
  }
}

// ── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_person_returns_stored_record() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/people",
    Some(json!({ "name": "Alice", "tags": ["climbing"] })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["name"], "Alice");
  assert_eq!(body["email"], "");
  assert_eq!(body["tags"], json!(["climbing"]));
  assert!(body["eventId"].is_null());
  assert!(body.get("updatedAt").is_none());

  let id = body["id"].as_str().unwrap();
  let (status, fetched) = send(&app, "GET", &format!("/people/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, body);
}

#[tokio::test]
async fn create_person_without_name_is_400() {
  let app = app();
  let (status, body) =
    send(&app, "POST", "/people", Some(json!({ "name": "   " }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["kind"], "validation");

  let (_, graph) = send(&app, "GET", "/graph", None).await;
  assert_eq!(graph["people"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_400() {
  let app = app();
  let req = Request::builder()
    .method("POST")
    .uri("/people")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_person_merges_fields() {
  let app = app();
  let id = create_person(&app, "Alice").await;

  let (status, body) = send(
    &app,
    "PUT",
    &format!("/people/{id}"),
    Some(json!({ "company": "Acme" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["name"], "Alice");
  assert_eq!(body["company"], "Acme");
  assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn unknown_person_is_404() {
  let app = app();
  let (status, body) = send(&app, "GET", "/people/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["kind"], "not_found");

  let (status, _) =
    send(&app, "PUT", "/people/nope", Some(json!({ "name": "X" }))).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(&app, "DELETE", "/people/nope", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_person_cascades_over_http() {
  let app = app();
  let a = create_person(&app, "A").await;
  let b = create_person(&app, "B").await;
  let c = create_person(&app, "C").await;
  send(&app, "POST", "/connections", Some(json!({ "from": a, "to": b }))).await;
  send(&app, "POST", "/connections", Some(json!({ "from": b, "to": c }))).await;

  let (status, body) = send(&app, "DELETE", &format!("/people/{b}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);
  assert_eq!(body, Value::Null);

  let (_, conns) = send(&app, "GET", "/connections", None).await;
  assert_eq!(conns, json!([]));
}

// ── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn event_date_defaults_and_round_trips() {
  let app = app();
  let (status, body) =
    send(&app, "POST", "/events", Some(json!({ "name": "Meetup" }))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert!(body["date"].is_string());
  assert_eq!(body["attendees"], json!([]));

  let (_, body) = send(
    &app,
    "POST",
    "/events",
    Some(json!({ "name": "Conf", "date": "2024-05-01" })),
  )
  .await;
  assert_eq!(body["date"], "2024-05-01");
}

#[tokio::test]
async fn event_form_blank_date_defaults_to_now() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/events",
    Some(json!({
      "name": "Meetup",
      "date": "",
      "location": "",
      "description": ""
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  let date = body["date"].as_str().unwrap();
  assert!(matches!(date.parse::<EventDate>(), Ok(EventDate::Instant(_))));
  assert_eq!(body["location"], "");
}

#[tokio::test]
async fn event_form_local_datetime_is_accepted() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/events",
    Some(json!({ "name": "Standup", "date": "2024-05-01T09:30" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["date"], "2024-05-01T09:30:00+00:00");

  let id = body["id"].as_str().unwrap();
  let (status, body) =
    send(&app, "PUT", &format!("/events/{id}"), Some(json!({ "date": "" })))
      .await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["date"].is_null());

  let (status, body) = send(
    &app,
    "POST",
    "/events",
    Some(json!({ "name": "Standup", "date": "someday" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn delete_event_clears_references() {
  let app = app();
  let e = create_event(&app, "Conf").await;
  let (_, person) = send(
    &app,
    "POST",
    "/people",
    Some(json!({ "name": "A", "eventId": e })),
  )
  .await;
  assert_eq!(person["eventId"], e.as_str());

  let (status, _) = send(&app, "DELETE", &format!("/events/{e}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (_, people) = send(&app, "GET", "/people", None).await;
  assert_eq!(people.as_array().unwrap().len(), 1);
  assert!(people[0]["eventId"].is_null());
}

#[tokio::test]
async fn person_with_unknown_event_is_404() {
  let app = app();
  let (status, body) = send(
    &app,
    "POST",
    "/people",
    Some(json!({ "name": "A", "eventId": "ghost" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["kind"], "not_found");
}

// ── Connections ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn connection_defaults_and_clamps() {
  let app = app();
  let a = create_person(&app, "A").await;
  let b = create_person(&app, "B").await;

  let (status, body) = send(
    &app,
    "POST",
    "/connections",
    Some(json!({ "from": a, "to": b, "strength": "9" })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["relationshipType"], "knows");
  assert_eq!(body["strength"], 5);
  assert_eq!(body["notes"], "");
}

#[tokio::test]
async fn connection_error_statuses() {
  let app = app();
  let a = create_person(&app, "A").await;
  let b = create_person(&app, "B").await;

  let (status, _) =
    send(&app, "POST", "/connections", Some(json!({ "from": a, "to": a }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = send(
    &app,
    "POST",
    "/connections",
    Some(json!({ "from": a, "to": "ghost" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) =
    send(&app, "POST", "/connections", Some(json!({ "from": a, "to": b }))).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, body) =
    send(&app, "POST", "/connections", Some(json!({ "from": b, "to": a }))).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn delete_connection_by_pair_key() {
  let app = app();
  let a = create_person(&app, "A").await;
  let b = create_person(&app, "B").await;
  let (_, conn) =
    send(&app, "POST", "/connections", Some(json!({ "from": a, "to": b }))).await;
  let id = conn["id"].as_str().unwrap();

  let (status, _) =
    send(&app, "DELETE", &format!("/connections/{id}"), None).await;
  assert_eq!(status, StatusCode::NO_CONTENT);

  let (status, _) =
    send(&app, "DELETE", &format!("/connections/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
