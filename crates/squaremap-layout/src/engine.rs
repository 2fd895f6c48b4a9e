//! Layout engine implementation.

use crate::config::LayoutConfig;
use crate::result::{LayoutResult, Tile};
use squaremap_core::{Hierarchy, HierarchyNode, Node, NodeId, Rect, Result, Size, TreemapError};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Sibling comparator supplied by the caller.
pub type Comparator = Arc<dyn Fn(&HierarchyNode, &HierarchyNode) -> Ordering + Send + Sync>;

/// Treemap layout engine.
///
/// The engine holds configuration only. Each call to [`layout`](Self::layout)
/// builds a fresh hierarchy and a fresh result, so one engine can be shared
/// between threads.
#[derive(Clone, Default)]
pub struct TreemapLayoutEngine {
    config: LayoutConfig,
    comparator: Option<Comparator>,
}

impl fmt::Debug for TreemapLayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreemapLayoutEngine")
            .field("config", &self.config)
            .field("custom_comparator", &self.comparator.is_some())
            .finish()
    }
}

impl TreemapLayoutEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            comparator: None,
        }
    }

    /// Replace the configured sibling order with a custom comparator.
    #[must_use]
    pub fn with_comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&HierarchyNode, &HierarchyNode) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute the layout of `root` inside a canvas of `size`.
    ///
    /// Fails without a partial result when the canvas is not drawable, the
    /// configuration is out of range, or a weight is negative or not finite.
    pub fn layout(&self, root: &Node, size: Size) -> Result<LayoutResult> {
        if !size.is_drawable() {
            log::warn!("rejecting canvas {}x{}", size.width, size.height);
            return Err(TreemapError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        self.config.validate()?;

        let mut hierarchy = Hierarchy::from_node(root)?;
        self.sort(&mut hierarchy);
        log::debug!(
            "laying out {} nodes (total {}) in {}x{} with {}",
            hierarchy.len(),
            hierarchy.root().value,
            size.width,
            size.height,
            self.config.tile
        );

        let rects = self.place(&hierarchy, Rect::from_size(size));
        let tiles = hierarchy
            .iter()
            .zip(rects)
            .map(|((node, entry), rect)| Tile {
                node,
                id: entry.id.clone(),
                name: entry.name.clone(),
                category: entry.category.clone(),
                value: entry.value,
                depth: entry.depth,
                height: entry.height,
                parent: entry.parent,
                children: entry.children.clone(),
                rect,
            })
            .collect();

        log::debug!("layout of '{}' complete", hierarchy.root().name);
        Ok(LayoutResult::new(size, tiles))
    }

    fn sort(&self, hierarchy: &mut Hierarchy) {
        if let Some(compare) = &self.comparator {
            hierarchy.sort_children_by(|a, b| compare(a, b));
        } else if let Some(compare) = self.config.order.comparator() {
            hierarchy.sort_children_by(compare);
        }
    }

    /// Assign a rect to every node, top-down.
    ///
    /// Each sibling group is tiled in its parent's cell, the area before
    /// padding. A node's rect is its cell inset by the padding and kept
    /// inside its parent's rect, so padding never compounds with depth and
    /// the children of a weighted node span exactly the parent's rect.
    fn place(&self, hierarchy: &Hierarchy, canvas: Rect) -> Vec<Rect> {
        let padding = self.config.padding;
        let mut cells = vec![Rect::default(); hierarchy.len()];
        let mut rects = vec![Rect::default(); hierarchy.len()];
        cells[NodeId::ROOT.index()] = canvas;
        rects[NodeId::ROOT.index()] = canvas.inset(padding);

        let mut stack = vec![NodeId::ROOT];
        let mut values = Vec::new();
        while let Some(id) = stack.pop() {
            let node = &hierarchy[id];
            if node.is_leaf() {
                continue;
            }

            let area = cells[id.index()];
            let bounds = rects[id.index()];
            values.clear();
            values.extend(node.children.iter().map(|&c| hierarchy[c].value));

            let child_cells = if node.value > 0.0 {
                self.config
                    .tile
                    .tile(&values, area, node.depth, self.config.ratio)
            } else {
                // Nothing to distribute: every child collapses onto the corner.
                vec![Rect::new(area.x0, area.y0, area.x0, area.y0); values.len()]
            };

            for (&child, cell) in node.children.iter().zip(child_cells) {
                cells[child.index()] = cell;
                rects[child.index()] = cell.inset(padding).clamp_to(&bounds);
                stack.push(child);
            }
        }
        rects
    }
}

/// Lay out `root` in a `width` x `height` canvas with default settings
/// and the given padding.
pub fn layout(root: &Node, width: f64, height: f64, padding: f64) -> Result<LayoutResult> {
    TreemapLayoutEngine::new(LayoutConfig::default().with_padding(padding))
        .layout(root, Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::SortOrder;
    use crate::tile::TileMethod;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_engine_default() {
        let engine = TreemapLayoutEngine::default();
        assert_eq!(engine.config(), &LayoutConfig::default());
        assert!(format!("{engine:?}").contains("custom_comparator: false"));
    }

    #[test]
    fn test_single_leaf_root() {
        let result = layout(&Node::leaf("only", 1.0), 100.0, 50.0, 0.0).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.root().rect, Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_single_child() {
        let tree = Node::branch("r", vec![Node::leaf("only", 1.0)]);
        let result = layout(&tree, 100.0, 50.0, 0.0).unwrap();
        assert_eq!(result.rect(NodeId(1)), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn test_two_equal_leaves_split_top_bottom() {
        let tree = Node::branch("r", vec![Node::leaf("a", 1.0), Node::leaf("b", 1.0)]);
        let result = layout(&tree, 100.0, 100.0, 0.0).unwrap();
        let a = result.rect(NodeId(1)).unwrap();
        let b = result.rect(NodeId(2)).unwrap();
        assert_eq!(a, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(b, Rect::new(0.0, 50.0, 100.0, 100.0));
        assert_eq!(a.y1, b.y0);
    }

    #[test]
    fn test_invalid_size() {
        let tree = Node::leaf("a", 1.0);
        assert!(matches!(
            layout(&tree, 0.0, 10.0, 0.0),
            Err(TreemapError::InvalidSize { .. })
        ));
        assert!(matches!(
            layout(&tree, 10.0, -1.0, 0.0),
            Err(TreemapError::InvalidSize { .. })
        ));
        assert!(layout(&tree, f64::NAN, 10.0, 0.0).is_err());
    }

    #[test]
    fn test_invalid_padding() {
        let tree = Node::leaf("a", 1.0);
        assert!(matches!(
            layout(&tree, 10.0, 10.0, -1.0),
            Err(TreemapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let tree = Node::branch("r", vec![Node::leaf("a", 1.0), Node::leaf("b", -1.0)]);
        assert!(matches!(
            layout(&tree, 10.0, 10.0, 0.0),
            Err(TreemapError::NegativeWeight { .. })
        ));
    }

    #[test]
    fn test_zero_weight_root_collapses_children() {
        let tree = Node::branch("r", vec![Node::leaf("a", 0.0), Node::leaf("b", 0.0)]);
        let result = layout(&tree, 10.0, 10.0, 0.0).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.root().rect.area(), 100.0);
        assert!(result.leaves().all(|t| t.rect.area() == 0.0));
    }

    #[test]
    fn test_padding_insets_every_node() {
        let tree = Node::branch("r", vec![Node::leaf("a", 1.0), Node::leaf("b", 1.0)]);
        let result = layout(&tree, 100.0, 100.0, 2.0).unwrap();
        assert_eq!(result.root().rect, Rect::new(2.0, 2.0, 98.0, 98.0));
        let a = result.rect(NodeId(1)).unwrap();
        let b = result.rect(NodeId(2)).unwrap();
        assert!(a.approx_eq(&Rect::new(2.0, 2.0, 98.0, 48.0), EPS));
        assert!(b.approx_eq(&Rect::new(2.0, 52.0, 98.0, 98.0), EPS));
        assert!(a.union(&b).approx_eq(&result.root().rect, EPS));
    }

    #[test]
    fn test_padding_does_not_compound_with_depth() {
        let tree = Node::branch(
            "r",
            vec![Node::branch("g", vec![Node::branch("h", vec![Node::leaf("a", 1.0)])])],
        );
        let result = layout(&tree, 100.0, 100.0, 2.0).unwrap();
        let expected = Rect::new(2.0, 2.0, 98.0, 98.0);
        for tile in result.tiles() {
            assert!(tile.rect.approx_eq(&expected, EPS), "{}", tile.name);
        }
    }

    #[test]
    fn test_padding_wider_than_cell_stays_inside_parent() {
        let tree = Node::branch("r", vec![Node::leaf("thin", 1.0), Node::leaf("wide", 99.0)]);
        let result = layout(&tree, 100.0, 10.0, 2.0).unwrap();
        let root = result.root().rect;
        let thin = result.rect(NodeId(1)).unwrap();
        let wide = result.rect(NodeId(2)).unwrap();
        assert!(root.contains_rect(&thin, EPS));
        assert_eq!(thin.width(), 0.0);
        assert!(thin.union(&wide).approx_eq(&root, EPS));
    }

    #[test]
    fn test_height_then_value_order() {
        let tree = Node::branch(
            "r",
            vec![
                Node::leaf("heavy leaf", 10.0),
                Node::branch("light branch", vec![Node::leaf("x", 1.0)]),
            ],
        );
        let result = layout(&tree, 100.0, 100.0, 0.0).unwrap();
        assert_eq!(result.root().children, vec![NodeId(2), NodeId(1)]);
    }

    #[test]
    fn test_input_order() {
        let tree = Node::branch("r", vec![Node::leaf("small", 1.0), Node::leaf("big", 3.0)]);
        let engine =
            TreemapLayoutEngine::new(LayoutConfig::default().with_order(SortOrder::Input));
        let result = engine.layout(&tree, Size::new(40.0, 40.0)).unwrap();
        assert_eq!(result.root().children, vec![NodeId(1), NodeId(2)]);
        assert_eq!(result.rect(NodeId(1)).unwrap().y0, 0.0);
    }

    #[test]
    fn test_custom_comparator() {
        let tree = Node::branch(
            "r",
            vec![Node::leaf("b", 1.0), Node::leaf("a", 2.0), Node::leaf("c", 3.0)],
        );
        let engine = TreemapLayoutEngine::default().with_comparator(|a, b| a.name.cmp(&b.name));
        let result = engine.layout(&tree, Size::new(30.0, 30.0)).unwrap();
        assert_eq!(result.root().children, vec![NodeId(2), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn test_tile_methods_conserve_area() {
        let tree = Node::branch(
            "r",
            vec![
                Node::branch("g", vec![Node::leaf("a", 3.0), Node::leaf("b", 1.0)]),
                Node::leaf("c", 2.0),
                Node::leaf("d", 2.0),
            ],
        );
        for tile in TileMethod::ALL {
            let engine = TreemapLayoutEngine::new(LayoutConfig::default().with_tile(tile));
            let result = engine.layout(&tree, Size::new(80.0, 50.0)).unwrap();
            let leaf_area: f64 = result.leaves().map(|t| t.rect.area()).sum();
            assert!((leaf_area - 4000.0).abs() < 1e-6, "{tile}: {leaf_area}");
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tree = Node::branch("r", vec![Node::leaf("a", 1.0), Node::leaf("b", 5.0)]);
        let before = tree.clone();
        let _ = layout(&tree, 10.0, 10.0, 1.0).unwrap();
        assert_eq!(tree, before);
    }
}
