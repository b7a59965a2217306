//! Pre-order flattening for table views

use crate::node::HierarchyNode;

/// One table row: a borrowed node and its depth from the traversal root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow<'a> {
    /// The member
    pub node: &'a HierarchyNode,
    /// Depth from the traversal root; replaces the stored `level`
    pub level: u32,
}

impl FlatRow<'_> {
    /// Display name of the row's member
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.node.display_name()
    }
}

/// Flatten a forest depth-first, parents before their descendants
///
/// `level` is the depth assigned to `nodes` themselves. The row count equals
/// the total node count of the input.
#[must_use]
pub fn flatten(nodes: &[HierarchyNode], level: u32) -> Vec<FlatRow<'_>> {
    let mut rows = Vec::new();
    flatten_into(nodes, level, &mut rows);
    rows
}

fn flatten_into<'a>(nodes: &'a [HierarchyNode], level: u32, rows: &mut Vec<FlatRow<'a>>) {
    for node in nodes {
        rows.push(FlatRow { node, level });
        flatten_into(&node.child, level + 1, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preorder_with_depths() {
        let root = HierarchyNode::member("root")
            .with_child(HierarchyNode::member("a").with_child(HierarchyNode::member("a1")))
            .with_child(HierarchyNode::member("b"));
        let rows = flatten(std::slice::from_ref(&root), 0);

        let shape: Vec<(&str, u32)> = rows.iter().map(|r| (r.display_name(), r.level)).collect();
        assert_eq!(shape, [("root", 0), ("a", 1), ("a1", 2), ("b", 1)]);
    }

    #[test]
    fn stored_level_is_ignored() {
        let root = HierarchyNode::member("root")
            .with_level(4)
            .with_child(HierarchyNode::member("x").with_level(0));
        let rows = flatten(std::slice::from_ref(&root), 0);
        assert_eq!(rows[0].level, 0);
        assert_eq!(rows[1].level, 1);
    }

    #[test]
    fn empty_forest() {
        assert!(flatten(&[], 0).is_empty());
    }
}
