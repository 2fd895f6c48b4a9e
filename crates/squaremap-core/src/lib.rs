#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
//! Core types for the squaremap treemap layout engine.
//!
//! This crate provides the data that flows into and out of a layout:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - The input tree: [`Node`], parsed from JSON by [`json::parse_tree`]
//! - The flattened, validated arena the engine works on: [`Hierarchy`]
//! - A single error type: [`TreemapError`]

mod error;
mod geometry;
mod hierarchy;
pub mod json;
mod node;

pub use error::{Result, TreemapError};
pub use geometry::{Point, Rect, Size};
pub use hierarchy::{Hierarchy, HierarchyNode, NodeId};
pub use node::Node;
