//! Level slicing
//!
//! Extracts the members sitting exactly at one traversal depth. Members from
//! different branches that share the depth become siblings in the result.

use crate::error::HierarchyError;
use crate::node::HierarchyNode;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Level selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelFilter {
    /// Every level, topology untouched
    #[default]
    All,
    /// Only nodes at this traversal depth
    Exactly(u32),
}

impl LevelFilter {
    /// Whether a row at `depth` passes the filter
    #[inline]
    #[must_use]
    pub fn admits(self, depth: u32) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(level) => level == depth,
        }
    }
}

impl Display for LevelFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Exactly(level) => write!(f, "{level}"),
        }
    }
}

impl FromStr for LevelFilter {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse()
            .map(Self::Exactly)
            .map_err(|_| HierarchyError::InvalidLevel(s.to_string()))
    }
}

/// Slice a forest down to the nodes at `target` depth
///
/// `current_level` is the depth of `nodes` themselves. With
/// [`LevelFilter::All`] the input is returned borrowed and unchanged.
/// Otherwise each node at the target depth is emitted with its children
/// cleared, and nodes above it are dropped in favour of their sliced
/// descendants, in pre-order.
#[must_use]
pub fn filter_by_level(
    nodes: &[HierarchyNode],
    target: LevelFilter,
    current_level: u32,
) -> Cow<'_, [HierarchyNode]> {
    match target {
        LevelFilter::All => Cow::Borrowed(nodes),
        LevelFilter::Exactly(level) => {
            let mut out = Vec::new();
            slice_into(nodes, level, current_level, &mut out);
            Cow::Owned(out)
        }
    }
}

fn slice_into(nodes: &[HierarchyNode], target: u32, current: u32, out: &mut Vec<HierarchyNode>) {
    for node in nodes {
        if current == target {
            out.push(node.with_children_replaced(Vec::new()));
        } else if current < target {
            slice_into(&node.child, target, current + 1, out);
        }
    }
}

/// Options for the level selector: "All Levels" then `0..=max_level`
#[must_use]
pub fn level_options(max_level: u32) -> Vec<LevelFilter> {
    std::iter::once(LevelFilter::All)
        .chain((0..=max_level).map(LevelFilter::Exactly))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<HierarchyNode> {
        vec![HierarchyNode::member("root")
            .with_child(HierarchyNode::member("a").with_child(HierarchyNode::member("a1")))
            .with_child(
                HierarchyNode::member("b")
                    .with_child(HierarchyNode::member("b1"))
                    .with_child(HierarchyNode::member("b2")),
            )]
    }

    fn names(nodes: &[HierarchyNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.username.as_str()).collect()
    }

    #[test]
    fn all_borrows_input() {
        let input = forest();
        let out = filter_by_level(&input, LevelFilter::All, 0);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, input.as_slice());
    }

    #[test]
    fn slice_level_one() {
        let input = forest();
        let out = filter_by_level(&input, LevelFilter::Exactly(1), 0);
        assert_eq!(names(&out), ["a", "b"]);
        assert!(out.iter().all(|n| n.child.is_empty()));
    }

    #[test]
    fn slice_collapses_branches() {
        let input = forest();
        let out = filter_by_level(&input, LevelFilter::Exactly(2), 0);
        assert_eq!(names(&out), ["a1", "b1", "b2"]);
    }

    #[test]
    fn slice_beyond_depth_is_empty() {
        let input = forest();
        assert!(filter_by_level(&input, LevelFilter::Exactly(7), 0).is_empty());
    }

    #[test]
    fn uses_traversal_depth_not_stored_level() {
        let input = vec![HierarchyNode::member("r").with_child(HierarchyNode::member("x").with_level(9))];
        let out = filter_by_level(&input, LevelFilter::Exactly(1), 0);
        assert_eq!(names(&out), ["x"]);
    }

    #[test]
    fn parse_filter() {
        assert_eq!("all".parse::<LevelFilter>().unwrap(), LevelFilter::All);
        assert_eq!("".parse::<LevelFilter>().unwrap(), LevelFilter::All);
        assert_eq!("3".parse::<LevelFilter>().unwrap(), LevelFilter::Exactly(3));
        assert!("deep".parse::<LevelFilter>().is_err());
    }

    #[test]
    fn options_list() {
        assert_eq!(
            level_options(2),
            vec![
                LevelFilter::All,
                LevelFilter::Exactly(0),
                LevelFilter::Exactly(1),
                LevelFilter::Exactly(2)
            ]
        );
    }
}
