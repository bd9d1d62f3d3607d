//! Handlers for whole-graph reads.
//!
//! | Method | Path           | Notes |
//! |--------|----------------|-------|
//! | `GET`  | `/graph`       | `{people, events, connections}` |
//! | `GET`  | `/graph/nodes` | Optional `?options=--size 5 --label false&scale=2` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};
use whatsnext_core::store::{GraphStore, Snapshot};
use whatsnext_render::{
  GraphView, NodeDrawing, RenderLink, draw_node, parse_option_flags,
};

use crate::error::ApiError;

// ─── Snapshot ─────────────────────────────────────────────────────────────────

/// `GET /graph`
pub async fn snapshot<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Snapshot>, ApiError>
where
  S: GraphStore,
{
  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  Ok(Json(snapshot))
}

// ─── Nodes ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct NodesParams {
  /// Option-flag string, e.g. `--type event --hover off`.
  pub options: Option<String>,
  pub scale:   Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NodesResponse {
  pub nodes: Vec<NodeDrawing>,
  pub links: Vec<RenderLink>,
}

/// `GET /graph/nodes[?options=<flags>&scale=<zoom>]`
///
/// Nodes are drawn at the origin; positions belong to the client's layout.
pub async fn nodes<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<NodesParams>, QueryRejection>,
) -> Result<Json<NodesResponse>, ApiError>
where
  S: GraphStore,
{
  let Query(params) = params?;
  let scale = params.scale.unwrap_or(1.0);
  if !scale.is_finite() || scale <= 0.0 {
    return Err(ApiError::validation(format!(
      "scale must be a positive number, got {scale}"
    )));
  }
  let options = parse_option_flags(params.options.as_deref().unwrap_or(""));

  let snapshot = store.snapshot().await.map_err(ApiError::store)?;
  let view = GraphView::from_snapshot(&snapshot);
  let nodes = view
    .nodes
    .iter()
    .map(|node| draw_node(node, scale, &options))
    .collect();

  Ok(Json(NodesResponse { nodes, links: view.links }))
}
