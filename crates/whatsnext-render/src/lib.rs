//! Node render policy for graph displays.
//!
//! Everything here is a pure function of its inputs: sizing a node from its
//! degree, describing what to draw for it, and parsing the `--key value`
//! option-flag language. Force-directed layout is the display layer's job;
//! positions are taken as given.

pub mod draw;
pub mod node;
pub mod options;
pub mod view;

pub use draw::{
  LabelBox, MonospaceEstimate, NodeDrawing, Point, Rect, Ring, TextMeasure,
  draw_node, draw_node_with,
};
pub use node::{MAX_SIZE, MIN_SIZE, RenderNode, render_size};
pub use options::{NodeKind, NodeSize, Palette, RenderOptions, parse_option_flags};
pub use view::{GraphView, RenderLink};
