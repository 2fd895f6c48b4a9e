//! Layout output: one tile per node.

use serde::{Deserialize, Serialize};
use squaremap_core::{NodeId, Point, Rect, Result, Size};

/// A placed node plus the metadata a renderer attaches to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Node identity within this layout.
    pub node: NodeId,
    /// Caller-supplied identifier, if the input had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Category (leaves only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Subtree weight.
    pub value: f64,
    /// Distance from the root.
    pub depth: usize,
    /// Distance to the deepest leaf below.
    pub height: usize,
    /// Parent tile, `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in the order they were tiled.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    /// Placement.
    pub rect: Rect,
}

impl Tile {
    /// Check if this is a leaf tile.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Geometry for every node of one tree.
///
/// Only the engine builds a result, so it always holds at least the root
/// tile.
///
/// Tiles are stored in input pre-order, so `tiles()[id.index()]` is the
/// tile for `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    size: Size,
    tiles: Vec<Tile>,
}

impl LayoutResult {
    pub(crate) fn new(size: Size, tiles: Vec<Tile>) -> Self {
        Self { size, tiles }
    }

    /// Canvas the layout was computed for.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The root tile.
    #[must_use]
    pub fn root(&self) -> &Tile {
        &self.tiles[NodeId::ROOT.index()]
    }

    /// Look up a tile.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Look up a node's rect.
    #[must_use]
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get(id).map(|tile| tile.rect)
    }

    /// Number of tiles (one per node).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a layout has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in input pre-order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Leaf tiles in input pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|tile| tile.is_leaf())
    }

    /// Child tiles of `id`, in tiling order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Tile> {
        self.get(id)
            .map(|tile| tile.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&child| self.get(child))
    }

    /// Tiles in drawing order: parents before children, siblings in tiling
    /// order.
    #[must_use]
    pub fn draw_order(&self) -> Vec<&Tile> {
        let mut out = Vec::with_capacity(self.tiles.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            if let Some(tile) = self.get(id) {
                out.push(tile);
                stack.extend(tile.children.iter().rev());
            }
        }
        out
    }

    /// Distinct leaf categories in drawing order, as a legend lists them.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for tile in self.draw_order() {
            if let (true, Some(category)) = (tile.is_leaf(), tile.category.as_deref()) {
                if !seen.contains(&category) {
                    seen.push(category);
                }
            }
        }
        seen
    }

    /// The deepest tile with positive area containing `point`.
    ///
    /// This is the tile a hover tooltip describes.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&Tile> {
        let root = self.root();
        if root.rect.is_degenerate() || !root.rect.contains_point(&point) {
            return None;
        }
        let mut current = root;
        while let Some(child) = self
            .children(current.node)
            .find(|c| !c.rect.is_degenerate() && c.rect.contains_point(&point))
        {
            current = child;
        }
        Some(current)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(node: usize, parent: Option<usize>, children: &[usize], rect: Rect) -> Tile {
        Tile {
            node: NodeId(node),
            id: None,
            name: format!("n{node}"),
            category: if children.is_empty() {
                Some(format!("c{}", node % 2))
            } else {
                None
            },
            value: rect.area(),
            depth: usize::from(parent.is_some()),
            height: usize::from(!children.is_empty()),
            parent: parent.map(NodeId),
            children: children.iter().copied().map(NodeId).collect(),
            rect,
        }
    }

    fn sample() -> LayoutResult {
        LayoutResult::new(
            Size::new(10.0, 10.0),
            vec![
                tile(0, None, &[2, 1, 3], Rect::new(0.0, 0.0, 10.0, 10.0)),
                tile(1, Some(0), &[], Rect::new(5.0, 0.0, 10.0, 10.0)),
                tile(2, Some(0), &[], Rect::new(0.0, 0.0, 5.0, 10.0)),
                tile(3, Some(0), &[], Rect::new(10.0, 0.0, 10.0, 10.0)),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let layout = sample();
        assert_eq!(layout.len(), 4);
        assert!(!layout.is_empty());
        assert_eq!(layout.root().node, NodeId(0));
        assert_eq!(layout.rect(NodeId(2)), Some(Rect::new(0.0, 0.0, 5.0, 10.0)));
        assert!(layout.get(NodeId(9)).is_none());
        assert_eq!(layout.leaves().count(), 3);
    }

    #[test]
    fn test_children_follow_tiling_order() {
        let layout = sample();
        let ids: Vec<_> = layout.children(NodeId(0)).map(|t| t.node).collect();
        assert_eq!(ids, vec![NodeId(2), NodeId(1), NodeId(3)]);
        assert_eq!(layout.children(NodeId(1)).count(), 0);
        assert_eq!(layout.children(NodeId(42)).count(), 0);
    }

    #[test]
    fn test_draw_order_and_categories() {
        let layout = sample();
        let order: Vec<_> = layout.draw_order().iter().map(|t| t.node.index()).collect();
        assert_eq!(order, vec![0, 2, 1, 3]);
        assert_eq!(layout.categories(), vec!["c0", "c1"]);
    }

    #[test]
    fn test_hit_test_deepest() {
        let layout = sample();
        assert_eq!(layout.hit_test(Point::new(2.0, 2.0)).map(|t| t.node), Some(NodeId(2)));
        assert_eq!(layout.hit_test(Point::new(7.0, 2.0)).map(|t| t.node), Some(NodeId(1)));
        assert!(layout.hit_test(Point::new(11.0, 2.0)).is_none());
    }

    #[test]
    fn test_hit_test_skips_degenerate() {
        let layout = sample();
        // x = 10 touches only the right edge of n1 and the zero-width n3.
        assert_eq!(layout.hit_test(Point::new(10.0, 5.0)).map(|t| t.node), Some(NodeId(1)));
    }

    #[test]
    fn test_to_json() {
        let layout = sample();
        let json = layout.to_json().unwrap();
        assert!(json.contains("\"x0\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let tiles: Vec<Tile> = serde_json::from_value(value["tiles"].clone()).unwrap();
        assert_eq!(tiles, layout.tiles());
        assert_eq!(value["size"]["width"], layout.size().width);
    }
}
