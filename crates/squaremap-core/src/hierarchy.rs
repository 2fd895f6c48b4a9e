//! Flattened hierarchy with computed values.
//!
//! [`Hierarchy`] copies a validated [`Node`] tree into an arena indexed by
//! [`NodeId`] (pre-order of the input), computing each node's value,
//! depth and height once. Layout works on this arena so the input tree is
//! never touched.

use crate::error::{Result, TreemapError};
use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Identity of a node inside one [`Hierarchy`]: its input pre-order index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root is always the first node in pre-order.
    pub const ROOT: Self = Self(0);

    /// Index into the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    /// Caller-supplied identifier, if any.
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Category (leaves only).
    pub category: Option<String>,
    /// Leaf value, or the sum of the children's values.
    pub value: f64,
    /// Distance from the root.
    pub depth: usize,
    /// Distance to the deepest leaf below.
    pub height: usize,
    /// Parent, `None` for the root.
    pub parent: Option<NodeId>,
    /// Children in layout order.
    pub children: Vec<NodeId>,
}

impl HierarchyNode {
    /// Check if this is a leaf node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena of [`HierarchyNode`]s built from a [`Node`] tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Validate `root` and flatten it.
    pub fn from_node(root: &Node) -> Result<Self> {
        root.validate()?;
        let mut nodes = Vec::with_capacity(root.descendant_count());
        Self::push(root, &root.name, None, 0, &mut nodes)?;
        Ok(Self { nodes })
    }

    /// Append `node` and its subtree; fails when a subtree sum overflows.
    fn push(
        node: &Node,
        path: &str,
        parent: Option<NodeId>,
        depth: usize,
        nodes: &mut Vec<HierarchyNode>,
    ) -> Result<NodeId> {
        let id = NodeId(nodes.len());
        nodes.push(HierarchyNode {
            id: node.id.clone(),
            name: node.name.clone(),
            category: node.category.clone(),
            value: 0.0,
            depth,
            height: 0,
            parent,
            children: Vec::with_capacity(node.children.len()),
        });

        let mut value = 0.0;
        let mut height = 0;
        let mut children = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let child_path = format!("{path}/{}", child.name);
            let child_id = Self::push(child, &child_path, Some(id), depth + 1, nodes)?;
            let entry = &nodes[child_id.index()];
            value += entry.value;
            height = height.max(entry.height + 1);
            children.push(child_id);
        }
        if children.is_empty() {
            value = node.value.unwrap_or(0.0);
        } else if !value.is_finite() {
            log::warn!("subtree weight at {path} overflows");
            return Err(TreemapError::NonFiniteWeight {
                path: path.to_string(),
            });
        }

        let entry = &mut nodes[id.index()];
        entry.value = value;
        entry.height = height;
        entry.children = children;
        Ok(id)
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.index())
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a hierarchy has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in input pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &HierarchyNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Leaf ids in input pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(|(_, n)| n.is_leaf()).map(|(id, _)| id)
    }

    /// Reorder every child list with `compare`.
    ///
    /// The sort is stable, so fully tied siblings keep their input order.
    /// Node ids are unaffected.
    pub fn sort_children_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&HierarchyNode, &HierarchyNode) -> Ordering,
    {
        for index in 0..self.nodes.len() {
            if self.nodes[index].children.len() < 2 {
                continue;
            }
            let mut children = std::mem::take(&mut self.nodes[index].children);
            children.sort_by(|a, b| compare(&self.nodes[a.index()], &self.nodes[b.index()]));
            self.nodes[index].children = children;
        }
    }
}

impl std::ops::Index<NodeId> for Hierarchy {
    type Output = HierarchyNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}
