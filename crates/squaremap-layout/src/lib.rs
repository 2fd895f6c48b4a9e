#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::suboptimal_flops)]
//! Treemap layout engine for squaremap.
//!
//! Implements the squarified treemap plus the classic slice, dice,
//! slice-dice and binary tilers.
//!
//! # Example
//!
//! ```
//! use squaremap_core::{Node, NodeId, Rect};
//!
//! let tree = Node::branch("root", vec![Node::leaf("a", 1.0), Node::leaf("b", 1.0)]);
//! let layout = squaremap_layout::layout(&tree, 100.0, 100.0, 0.0).unwrap();
//!
//! assert_eq!(layout.rect(NodeId(1)), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
//! assert_eq!(layout.rect(NodeId(2)), Some(Rect::new(0.0, 50.0, 100.0, 100.0)));
//! ```

mod config;
mod engine;
mod order;
mod result;
mod squarify;
mod tile;

pub use config::{LayoutConfig, GOLDEN_RATIO};
pub use engine::{layout, Comparator, TreemapLayoutEngine};
pub use order::{by_height_then_value, by_value, SortOrder};
pub use result::{LayoutResult, Tile};
pub use squarify::squarify;
pub use tile::TileMethod;
