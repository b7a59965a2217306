//! Path-qualified node keys
//!
//! Provides [`ExpansionKey`] for addressing a node by its position in the
//! rendered tree. Two members with the same display name in different
//! branches, or as siblings with different identifiers, always get
//! different keys.

use crate::node::HierarchyNode;
use std::fmt::{self, Display, Formatter};

/// One step of a key path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeySegment {
    /// Backend identifier of the node
    Id(String),
    /// Position among siblings, for nodes without an identifier
    Position(usize),
}

impl Display for KeySegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => f.write_str(id),
            Self::Position(index) => write!(f, "#{index}"),
        }
    }
}

/// Parent path plus this node's identifier
///
/// # Examples
/// - `[Id("1"), Id("42")]` → `1/42`
/// - `[Id("1"), Position(3)]` → `1/#3`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpansionKey(Vec<KeySegment>);

impl ExpansionKey {
    /// Empty path: the parent of the top-level nodes
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Key for `node`, the `index`-th child under this key
    #[must_use]
    pub fn child(&self, node: &HierarchyNode, index: usize) -> Self {
        let segment = match &node.id {
            Some(id) if !id.is_empty() => KeySegment::Id(id.clone()),
            _ => KeySegment::Position(index),
        };
        let mut next = self.clone();
        next.0.push(segment);
        next
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    /// Number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the empty path
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parent key (if not empty)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, rest)| Self(rest.to_vec()))
    }

    /// Check if this key is a strict ancestor of another
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && other.0[..self.0.len()] == self.0[..]
    }
}

impl Display for ExpansionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
