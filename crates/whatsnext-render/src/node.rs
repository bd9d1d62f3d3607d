//! The node shape consumed by the render policy, and degree-based sizing.

use serde::{Deserialize, Serialize};

use crate::options::{NodeKind, NodeSize, RenderOptions};

/// Smallest radius `NodeSize::Auto` will produce.
pub const MIN_SIZE: f64 = 3.0;
/// Largest radius `NodeSize::Auto` will produce.
pub const MAX_SIZE: f64 = 10.0;

/// One node as a display layer sees it: identity, a little metadata, and
/// whatever position and interaction state the layout engine has assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
  pub id:       String,
  /// `None` falls back to [`RenderOptions::kind`].
  pub kind:     Option<NodeKind>,
  pub name:     String,
  pub degree:   Option<f64>,
  /// Secondary weight, used when `degree` is absent.
  pub value:    Option<f64>,
  /// Own fill colour; only honoured for custom nodes.
  pub color:    Option<String>,
  #[serde(default)]
  pub x:        f64,
  #[serde(default)]
  pub y:        f64,
  #[serde(default)]
  pub hovered:  bool,
  #[serde(default)]
  pub selected: bool,
}

impl RenderNode {
  /// `degree`, else `value`, else 1. Negative and NaN weights count as 0.
  pub fn effective_degree(&self) -> f64 {
    self.degree.or(self.value).unwrap_or(1.0).max(0.0)
  }
}

/// Radius to draw `node` at.
///
/// With [`NodeSize::Auto`] the radius is `MIN_SIZE + 2·ln(degree + 1)`
/// clamped to `[MIN_SIZE, MAX_SIZE]`, so a handful of hubs cannot swamp the
/// canvas. A fixed size is returned as is.
pub fn render_size(node: &RenderNode, options: &RenderOptions) -> f64 {
  match options.size {
    NodeSize::Auto => {
      let degree = node.effective_degree();
      (MIN_SIZE + 2.0 * (degree + 1.0).ln()).clamp(MIN_SIZE, MAX_SIZE)
    }
    NodeSize::Fixed(size) => size,
  }
}
