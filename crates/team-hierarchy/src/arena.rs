//! Index arena over a borrowed hierarchy
//!
//! Nodes are laid out in pre-order, so a parent always has a smaller index
//! than its descendants. Filtered views are returned as index lists instead
//! of copied subtrees.

use crate::level::LevelFilter;
use crate::node::HierarchyNode;

/// Position of a node in a [`HierarchyArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(usize);

impl NodeIdx {
    /// Raw pre-order position
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot<'t> {
    node: &'t HierarchyNode,
    parent: Option<NodeIdx>,
    children: Vec<NodeIdx>,
    depth: u32,
}

/// Pre-order arena of a forest
#[derive(Debug, Clone)]
pub struct HierarchyArena<'t> {
    slots: Vec<Slot<'t>>,
    roots: Vec<NodeIdx>,
}

impl<'t> HierarchyArena<'t> {
    /// Lay out a forest; `roots` sit at depth 0
    #[must_use]
    pub fn build(roots: &'t [HierarchyNode]) -> Self {
        let mut arena = Self {
            slots: Vec::new(),
            roots: Vec::with_capacity(roots.len()),
        };
        for node in roots {
            let idx = arena.push(node, None, 0);
            arena.roots.push(idx);
        }
        arena
    }

    fn push(&mut self, node: &'t HierarchyNode, parent: Option<NodeIdx>, depth: u32) -> NodeIdx {
        let idx = NodeIdx(self.slots.len());
        self.slots.push(Slot {
            node,
            parent,
            children: Vec::with_capacity(node.child.len()),
            depth,
        });
        for child in &node.child {
            let child_idx = self.push(child, Some(idx), depth + 1);
            self.slots[idx.0].children.push(child_idx);
        }
        idx
    }

    /// Total nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the forest is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Top-level nodes
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeIdx] {
        &self.roots
    }

    /// Node at `idx`
    #[inline]
    #[must_use]
    pub fn node(&self, idx: NodeIdx) -> &'t HierarchyNode {
        self.slots[idx.0].node
    }

    /// Parent of `idx`
    #[inline]
    #[must_use]
    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.slots[idx.0].parent
    }

    /// Ordered children of `idx`
    #[inline]
    #[must_use]
    pub fn children(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.slots[idx.0].children
    }

    /// Traversal depth of `idx`
    #[inline]
    #[must_use]
    pub fn depth(&self, idx: NodeIdx) -> u32 {
        self.slots[idx.0].depth
    }

    /// Deepest traversal depth in the forest
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.slots.iter().map(|s| s.depth).max().unwrap_or(0)
    }

    /// Every node with its depth, parents before descendants
    #[must_use]
    pub fn preorder(&self) -> Vec<(NodeIdx, u32)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (NodeIdx(i), slot.depth))
            .collect()
    }

    /// Nodes kept by a name search (matches and their ancestors), pre-order
    #[must_use]
    pub fn search_view(&self, query: &str) -> Vec<NodeIdx> {
        let needle = query.to_lowercase();
        let mut retained = vec![false; self.slots.len()];
        // children have larger indices, so a reverse sweep sees them first
        for i in (0..self.slots.len()).rev() {
            if retained[i] || self.slots[i].node.matches_lowered(&needle) {
                retained[i] = true;
                if let Some(parent) = self.slots[i].parent {
                    retained[parent.0] = true;
                }
            }
        }
        retained
            .iter()
            .enumerate()
            .filter_map(|(i, keep)| keep.then_some(NodeIdx(i)))
            .collect()
    }

    /// Top-level entries after a level slice
    ///
    /// `All` yields the roots; `Exactly(n)` yields every node at depth `n`
    /// in pre-order.
    #[must_use]
    pub fn level_slice(&self, filter: LevelFilter) -> Vec<NodeIdx> {
        match filter {
            LevelFilter::All => self.roots.clone(),
            LevelFilter::Exactly(level) => self
                .preorder()
                .into_iter()
                .filter(|(_, depth)| *depth == level)
                .map(|(idx, _)| idx)
                .collect(),
        }
    }
}
