//! Name search over a hierarchy
//!
//! Prunes a tree to the members whose display name contains the query,
//! keeping every ancestor of a match so the result is still a tree.

use crate::node::HierarchyNode;

/// Filter a tree by display name, retaining ancestors of matches
///
/// Matching is a case-insensitive substring test on the display name; an
/// empty query matches every node. A node survives if it matches or any
/// descendant does, and carries only its surviving children in their
/// original order. The root is judged like any other node, so `None` means
/// nothing in the tree matched.
#[must_use]
pub fn filter_tree(node: &HierarchyNode, query: &str) -> Option<HierarchyNode> {
    let needle = query.to_lowercase();
    filter_lowered(node, &needle)
}

fn filter_lowered(node: &HierarchyNode, needle: &str) -> Option<HierarchyNode> {
    let child: Vec<HierarchyNode> = node
        .child
        .iter()
        .filter_map(|c| filter_lowered(c, needle))
        .collect();

    if node.matches_lowered(needle) || !child.is_empty() {
        Some(node.with_children_replaced(child))
    } else {
        None
    }
}

/// Whether a single node's display name matches the query
#[inline]
#[must_use]
pub fn name_matches(node: &HierarchyNode, query: &str) -> bool {
    node.matches_lowered(&query.to_lowercase())
}
