//! Render options and the `--key value` flag language that sets them.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// What a node stands for. Drives its fill colour.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
  Person,
  Event,
  #[default]
  Custom,
}

/// How big to draw a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeSize {
  /// Grow logarithmically with the node's degree.
  #[default]
  Auto,
  /// A literal radius, regardless of degree.
  Fixed(f64),
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// CSS colour strings used when drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
  pub person:   String,
  pub event:    String,
  /// Fill for anything that is neither a person nor an event and carries no
  /// colour of its own.
  pub custom:   String,
  pub stroke:   String,
  pub text:     String,
  pub label_bg: String,
}

impl Default for Palette {
  fn default() -> Self {
    Self {
      person:   "#4CAF50".into(),
      event:    "#2196F3".into(),
      custom:   "#9E9E9E".into(),
      stroke:   "#fff".into(),
      text:     "#000".into(),
      label_bg: "rgba(255, 255, 255, 0.8)".into(),
    }
  }
}

// ─── RenderOptions ───────────────────────────────────────────────────────────

/// Display options, fully resolved. Build one with [`Default`] or
/// [`parse_option_flags`] and reuse it for every draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
  /// Kind assumed for nodes that don't state their own. Default `custom`.
  pub kind:      NodeKind,
  /// Draw the name label under each node. Default on.
  pub label:     bool,
  /// Let hover state count towards highlighting. Default on.
  pub hover:     bool,
  /// Let selection (click) state count towards highlighting. Default on.
  pub click:     bool,
  /// Default [`NodeSize::Auto`].
  pub size:      NodeSize,
  /// Ring hovered/selected nodes. Default on.
  pub highlight: bool,
  pub colors:    Palette,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      kind:      NodeKind::default(),
      label:     true,
      hover:     true,
      click:     true,
      size:      NodeSize::default(),
      highlight: true,
      colors:    Palette::default(),
    }
  }
}

// ─── Flag parsing ────────────────────────────────────────────────────────────

static FLAG_PATTERN: LazyLock<Option<Regex>> =
  LazyLock::new(|| Regex::new(r"--(\w+)\s+(\S+)").ok());

/// Leading decimal number, so `6px` reads as `6`.
static NUMBER_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
  Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").ok()
});

/// Parse a flag string such as `--type person --size 6 --label off`.
///
/// Starts from [`RenderOptions::default`] and applies every recognised
/// `--key value` pair in order. Unknown keys, invalid `type` values and
/// unparseable sizes are skipped; this never fails.
pub fn parse_option_flags(args: &str) -> RenderOptions {
  let mut options = RenderOptions::default();
  let Some(pattern) = FLAG_PATTERN.as_ref() else {
    return options;
  };

  for caps in pattern.captures_iter(args) {
    let value = &caps[2];
    match &caps[1] {
      "type" => {
        if let Ok(kind) = value.parse::<NodeKind>() {
          options.kind = kind;
        }
      }
      "label" => options.label = is_on(value),
      "hover" => options.hover = is_on(value),
      "click" => options.click = is_on(value),
      "highlight" => options.highlight = is_on(value),
      "size" => {
        if let Some(size) = parse_size(value) {
          options.size = size;
        }
      }
      _ => {}
    }
  }

  options
}

fn is_on(value: &str) -> bool { value == "on" }

fn parse_size(value: &str) -> Option<NodeSize> {
  if value == "auto" {
    return Some(NodeSize::Auto);
  }
  let number = NUMBER_PREFIX.as_ref()?.find(value)?;
  number
    .as_str()
    .parse::<f64>()
    .ok()
    .filter(|s| s.is_finite() && *s > 0.0)
    .map(NodeSize::Fixed)
}
