//! Expand/collapse state for the tree view
//!
//! Keys absent from the store are collapsed; the synthetic root is always
//! shown expanded. Toggling a node never touches its descendants, so a
//! re-expanded parent shows its children as they were left.

use crate::key::ExpansionKey;
use crate::node::HierarchyNode;
use std::collections::HashMap;

/// Per-node expanded flags keyed by tree position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<ExpansionKey, bool>,
}

impl ExpansionState {
    /// Create empty state (everything collapsed)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one key; returns the new state
    pub fn toggle(&mut self, key: &ExpansionKey) -> bool {
        let entry = self.expanded.entry(key.clone()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Set one key explicitly
    pub fn set(&mut self, key: ExpansionKey, expanded: bool) {
        self.expanded.insert(key, expanded);
    }

    /// Remembered state for a key (absent = collapsed)
    #[inline]
    #[must_use]
    pub fn is_expanded(&self, key: &ExpansionKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    /// Effective state for a rendered node: the root is always open
    #[inline]
    #[must_use]
    pub fn is_node_expanded(&self, node: &HierarchyNode, key: &ExpansionKey) -> bool {
        node.is_root || self.is_expanded(key)
    }

    /// Expand every node that has children
    pub fn expand_all(&mut self, roots: &[HierarchyNode]) {
        let parent = ExpansionKey::root();
        for (index, node) in roots.iter().enumerate() {
            self.expand_subtree(node, parent.child(node, index));
        }
    }

    fn expand_subtree(&mut self, node: &HierarchyNode, key: ExpansionKey) {
        for (index, child) in node.child.iter().enumerate() {
            self.expand_subtree(child, key.child(child, index));
        }
        if node.has_children() {
            self.expanded.insert(key, true);
        }
    }

    /// Collapse every remembered entry, keeping the keys
    pub fn collapse_all(&mut self) {
        for expanded in self.expanded.values_mut() {
            *expanded = false;
        }
    }

    /// Forget every entry (all collapsed)
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// Number of remembered entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing is remembered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// A node visible in the tree view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    /// The member
    pub node: &'a HierarchyNode,
    /// Position key used for toggling
    pub key: ExpansionKey,
    /// Depth within the rendered forest
    pub depth: u32,
    /// Effective expanded state
    pub expanded: bool,
}

impl VisibleRow<'_> {
    /// Whether a toggle control should be drawn
    #[inline]
    #[must_use]
    pub fn is_toggleable(&self) -> bool {
        self.node.has_children() && !self.node.is_root
    }
}

/// Rows reachable through expanded ancestors, in pre-order
#[must_use]
pub fn visible_rows<'a>(roots: &'a [HierarchyNode], state: &ExpansionState) -> Vec<VisibleRow<'a>> {
    let mut rows = Vec::new();
    let parent = ExpansionKey::root();
    for (index, node) in roots.iter().enumerate() {
        collect_visible(node, parent.child(node, index), 0, state, &mut rows);
    }
    rows
}

fn collect_visible<'a>(
    node: &'a HierarchyNode,
    key: ExpansionKey,
    depth: u32,
    state: &ExpansionState,
    rows: &mut Vec<VisibleRow<'a>>,
) {
    let expanded = state.is_node_expanded(node, &key);
    let children_key = key.clone();
    rows.push(VisibleRow {
        node,
        key,
        depth,
        expanded,
    });
    if expanded {
        for (index, child) in node.child.iter().enumerate() {
            collect_visible(child, children_key.child(child, index), depth + 1, state, rows);
        }
    }
}
