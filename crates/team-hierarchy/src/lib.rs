//! Team Hierarchy - referral network model and views
//!
//! Pure, synchronous building blocks for the team dashboard:
//! - [`HierarchyNode`] trees wrapped under a synthetic viewer root
//! - Name search that keeps ancestors of matches
//! - Level slicing and the level selector options
//! - Pre-order flattening with table filtering and pagination
//! - Position-keyed expand/collapse state
//! - Leg business summaries with top-performer marks
//! - An index arena producing filtered views without copying subtrees
//!
//! # Pipeline
//!
//! ```text
//! members ──► synthetic_root ──► filter_tree ──► filter_by_level ──► visible_rows   (tree)
//!                    │
//!                    └──────────► flatten ──► TableState::apply                    (table)
//! ```
//!
//! Every view is recomputed from the unmodified base tree.
//!
//! # Example
//!
//! ```rust
//! use team_hierarchy::prelude::*;
//!
//! let viewer = Viewer::new("1", "me");
//! let root = HierarchyNode::synthetic_root(
//!     &viewer,
//!     vec![HierarchyNode::member("john").with_level(1)],
//! );
//!
//! let found = filter_tree(&root, "JOHN").expect("john matches");
//! assert_eq!(found.child.len(), 1);
//!
//! let rows = flatten(std::slice::from_ref(&root), 0);
//! assert_eq!(rows.len(), root.node_count());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod aggregate;
pub mod arena;
pub mod error;
pub mod expansion;
pub mod flatten;
pub mod key;
pub mod leg;
pub mod level;
pub mod node;
pub mod search;
pub mod table;
pub mod wire;

// Re-exports for convenience
pub use aggregate::{
    mark_top_performers, max_combined_business, top_performer_threshold, top_performers,
    LegBusinessSummary, LegTotals,
};
pub use arena::{HierarchyArena, NodeIdx};
pub use error::{HierarchyError, HierarchyResult};
pub use expansion::{visible_rows, ExpansionState, VisibleRow};
pub use flatten::{flatten, FlatRow};
pub use key::{ExpansionKey, KeySegment};
pub use leg::Leg;
pub use level::{filter_by_level, level_options, LevelFilter};
pub use node::{HierarchyNode, MemberStats, Viewer};
pub use search::{filter_tree, name_matches};
pub use table::{filter_rows, paginate, Page, TableState, DEFAULT_PAGE_SIZE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with team hierarchies
    pub use crate::aggregate::{mark_top_performers, LegBusinessSummary, LegTotals};
    pub use crate::expansion::{visible_rows, ExpansionState};
    pub use crate::flatten::{flatten, FlatRow};
    pub use crate::key::ExpansionKey;
    pub use crate::leg::Leg;
    pub use crate::level::{filter_by_level, LevelFilter};
    pub use crate::node::{HierarchyNode, Viewer};
    pub use crate::search::filter_tree;
    pub use crate::table::{paginate, TableState};
}
