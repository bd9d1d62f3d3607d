//! Describing a node drawing.
//!
//! [`draw_node`] does not touch a canvas. It returns a [`NodeDrawing`] that a
//! display layer replays with its own primitives (fill a circle, stroke a
//! ring, fill a rectangle, fill text). Pixel constants are divided by the
//! zoom `scale` so strokes and text keep the same on-screen size at any zoom.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::{
  node::{RenderNode, render_size},
  options::{NodeKind, RenderOptions},
};

const FONT_PX: f64 = 12.0;
const LABEL_PADDING: f64 = 0.4;
const LABEL_GAP: f64 = 3.0;
const RING_WIDTH_PX: f64 = 2.0;
const GLOW_BLUR_PX: f64 = 10.0;

// ─── Text measurement ────────────────────────────────────────────────────────

/// Width of a string when rendered at a given font size, in the same units
/// as the font size.
pub trait TextMeasure {
  fn text_width(&self, text: &str, font_size: f64) -> f64;
}

impl<F> TextMeasure for F
where
  F: Fn(&str, f64) -> f64,
{
  fn text_width(&self, text: &str, font_size: f64) -> f64 {
    self(text, font_size)
  }
}

/// Estimate for when no real font metrics are at hand: every terminal column
/// of the string is `0.6 · font_size` wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceEstimate;

impl TextMeasure for MonospaceEstimate {
  fn text_width(&self, text: &str, font_size: f64) -> f64 {
    UnicodeWidthStr::width(text) as f64 * 0.6 * font_size
  }
}

// ─── Output ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
  pub x:      f64,
  pub y:      f64,
  pub width:  f64,
  pub height: f64,
}

/// Highlight drawn around a hovered or selected node: an outline on the node
/// itself plus a blurred glow ring just outside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
  pub outline_color: String,
  pub glow_color:    String,
  pub glow_radius:   f64,
  pub line_width:    f64,
  pub glow_blur:     f64,
}

/// Name label centred under the node on a padded background.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelBox {
  pub text:       String,
  pub font_size:  f64,
  /// CSS font shorthand, e.g. `12px Sans-Serif`.
  pub font:       String,
  pub text_color: String,
  /// Centre of the text; align centre, baseline middle.
  pub anchor:     Point,
  pub background: Rect,
  pub bg_color:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDrawing {
  pub id:     String,
  pub center: Point,
  pub radius: f64,
  pub fill:   String,
  pub ring:   Option<Ring>,
  pub label:  Option<LabelBox>,
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

/// [`draw_node_with`] using [`MonospaceEstimate`] for label widths.
pub fn draw_node(
  node: &RenderNode,
  scale: f64,
  options: &RenderOptions,
) -> NodeDrawing {
  draw_node_with(node, scale, options, &MonospaceEstimate)
}

/// Describe how to draw `node` at zoom `scale`.
///
/// A `scale` that is not a positive finite number is treated as 1.
pub fn draw_node_with(
  node: &RenderNode,
  scale: f64,
  options: &RenderOptions,
  measure: &impl TextMeasure,
) -> NodeDrawing {
  let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
  let colors = &options.colors;

  let fill = match node.kind.unwrap_or(options.kind) {
    NodeKind::Person => colors.person.clone(),
    NodeKind::Event => colors.event.clone(),
    NodeKind::Custom => node.color.clone().unwrap_or_else(|| colors.custom.clone()),
  };
  let radius = render_size(node, options);

  let hovered = options.hover && node.hovered;
  let selected = options.click && node.selected;
  let ring = (options.highlight && (hovered || selected)).then(|| Ring {
    outline_color: colors.stroke.clone(),
    glow_color:    fill.clone(),
    glow_radius:   radius + 1.0,
    line_width:    RING_WIDTH_PX / scale,
    glow_blur:     GLOW_BLUR_PX / scale,
  });

  let label = (options.label && !node.name.is_empty()).then(|| {
    let font_size = FONT_PX / scale;
    let pad = font_size * LABEL_PADDING;
    let width = measure.text_width(&node.name, font_size) + pad;
    let height = font_size + pad;
    let top = node.y + radius + LABEL_GAP;

    LabelBox {
      text: node.name.clone(),
      font_size,
      font: format!("{font_size}px Sans-Serif"),
      text_color: colors.text.clone(),
      anchor: Point { x: node.x, y: top + font_size / 2.0 },
      background: Rect { x: node.x - width / 2.0, y: top, width, height },
      bg_color: colors.label_bg.clone(),
    }
  });

  NodeDrawing {
    id: node.id.clone(),
    center: Point { x: node.x, y: node.y },
    radius,
    fill,
    ring,
    label,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::options::{NodeSize, parse_option_flags};

  fn node(kind: Option<NodeKind>) -> RenderNode {
    RenderNode {
      id: "n1".into(),
      kind,
      name: "Alice".into(),
      degree: Some(3.0),
      x: 10.0,
      y: 20.0,
      ..RenderNode::default()
    }
  }

  fn fixed_width(_: &str, _: f64) -> f64 { 30.0 }

  #[test]
  fn fill_follows_kind() {
    let opts = RenderOptions::default();
    let mut custom = node(Some(NodeKind::Custom));
    custom.color = Some("#123456".into());

    assert_eq!(draw_node(&node(Some(NodeKind::Person)), 1.0, &opts).fill, "#4CAF50");
    assert_eq!(draw_node(&node(Some(NodeKind::Event)), 1.0, &opts).fill, "#2196F3");
    assert_eq!(draw_node(&custom, 1.0, &opts).fill, "#123456");
    assert_eq!(draw_node(&node(Some(NodeKind::Custom)), 1.0, &opts).fill, "#9E9E9E");
  }

  #[test]
  fn unkinded_nodes_use_option_kind() {
    let opts = parse_option_flags("--type event");
    assert_eq!(draw_node(&node(None), 1.0, &opts).fill, "#2196F3");
  }

  #[test]
  fn person_colour_beats_own_colour() {
    let mut n = node(Some(NodeKind::Person));
    n.color = Some("#000000".into());
    assert_eq!(draw_node(&n, 1.0, &RenderOptions::default()).fill, "#4CAF50");
  }

  #[test]
  fn radius_comes_from_render_size() {
    let opts = RenderOptions { size: NodeSize::Fixed(8.0), ..RenderOptions::default() };
    assert_eq!(draw_node(&node(None), 1.0, &opts).radius, 8.0);
  }

  #[test]
  fn ring_only_when_highlighted() {
    let opts = RenderOptions::default();
    let mut n = node(Some(NodeKind::Person));
    assert!(draw_node(&n, 1.0, &opts).ring.is_none());

    n.hovered = true;
    let d = draw_node(&n, 2.0, &opts);
    let ring = d.ring.unwrap();
    assert_eq!(ring.glow_radius, d.radius + 1.0);
    assert_eq!(ring.line_width, 1.0);
    assert_eq!(ring.glow_blur, 5.0);
    assert_eq!(ring.glow_color, d.fill);
    assert_eq!(ring.outline_color, "#fff");

    let off = parse_option_flags("--highlight off");
    assert!(draw_node(&n, 1.0, &off).ring.is_none());
  }

  #[test]
  fn hover_and_click_gate_their_states() {
    let mut hovered = node(None);
    hovered.hovered = true;
    let mut selected = node(None);
    selected.selected = true;

    let no_hover = parse_option_flags("--hover off");
    assert!(draw_node(&hovered, 1.0, &no_hover).ring.is_none());
    assert!(draw_node(&selected, 1.0, &no_hover).ring.is_some());

    let no_click = parse_option_flags("--click off");
    assert!(draw_node(&selected, 1.0, &no_click).ring.is_none());
  }

  #[test]
  fn label_geometry_scales_with_zoom() {
    let opts = RenderOptions { size: NodeSize::Fixed(5.0), ..RenderOptions::default() };
    let d = draw_node_with(&node(None), 2.0, &opts, &fixed_width);
    let label = d.label.unwrap();

    assert_eq!(label.font_size, 6.0);
    assert_eq!(label.font, "6px Sans-Serif");
    let pad = 6.0 * 0.4;
    assert_eq!(label.background.width, 30.0 + pad);
    assert_eq!(label.background.height, 6.0 + pad);
    assert_eq!(label.background.x, 10.0 - (30.0 + pad) / 2.0);
    assert_eq!(label.background.y, 20.0 + 5.0 + 3.0);
    assert_eq!(label.anchor, Point { x: 10.0, y: 28.0 + 3.0 });
  }

  #[test]
  fn no_label_when_disabled_or_unnamed() {
    let off = parse_option_flags("--label off");
    assert!(draw_node(&node(None), 1.0, &off).label.is_none());

    let mut unnamed = node(None);
    unnamed.name.clear();
    assert!(draw_node(&unnamed, 1.0, &RenderOptions::default()).label.is_none());
  }

  #[test]
  fn monospace_estimate_counts_columns() {
    assert_eq!(MonospaceEstimate.text_width("abcd", 10.0), 24.0);
    assert_eq!(MonospaceEstimate.text_width("日本", 10.0), 24.0);
  }

  #[test]
  fn bad_scale_is_treated_as_one() {
    let opts = RenderOptions::default();
    let zero = draw_node(&node(None), 0.0, &opts);
    let one = draw_node(&node(None), 1.0, &opts);
    assert_eq!(zero, one);
  }
}
