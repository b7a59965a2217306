//! Team view state
//!
//! [`TeamView`] keeps the fetched base tree untouched and derives the tree
//! and table views from it on every read, so clearing a search or widening
//! the level always restores the full team.

use std::sync::Arc;
use team_client::{ClientResult, FetchOutcome, RequestSequencer, RequestTicket};
use team_hierarchy::{
    filter_by_level, filter_tree, flatten, level_options, visible_rows, ExpansionKey,
    ExpansionState, FlatRow, HierarchyNode, Leg, LevelFilter, MemberStats, TableState, Viewer,
    VisibleRow,
};
use tracing::{debug, warn};

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// New base tree installed
    Applied,
    /// A newer request was issued; result dropped
    Stale,
    /// No session; nothing changed
    Skipped,
    /// Backend failed; prior tree kept
    Failed,
}

/// Tree-mode result: search then level slice over the base tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSnapshot {
    /// Top-level entries to render
    pub roots: Vec<HierarchyNode>,
}

impl TreeSnapshot {
    /// Whether nothing matched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Rows visible under the given expansion state
    #[must_use]
    pub fn visible<'a>(&'a self, state: &ExpansionState) -> Vec<VisibleRow<'a>> {
        visible_rows(&self.roots, state)
    }
}

/// One page of the table view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot<'a> {
    /// Rows on this page
    pub rows: Vec<FlatRow<'a>>,
    /// 1-based page index
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Rows matching the filters across all pages
    pub total_rows: usize,
}

impl TableSnapshot<'_> {
    /// Number of pages (0 when nothing matched)
    #[inline]
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_rows.div_ceil(self.page_size)
        }
    }
}

/// State behind the team hierarchy screen
#[derive(Debug)]
pub struct TeamView {
    viewer: Viewer,
    leg: Leg,
    base: Option<Arc<HierarchyNode>>,
    expansion: ExpansionState,
    table: TableState,
    loading: bool,
    sequencer: RequestSequencer,
    applied: Option<RequestTicket>,
    last_error: Option<String>,
}

impl TeamView {
    /// Create an empty view for a viewer
    #[must_use]
    pub fn new(viewer: Viewer, page_size: usize) -> Self {
        Self {
            viewer,
            leg: Leg::All,
            base: None,
            expansion: ExpansionState::new(),
            table: TableState::new(page_size),
            loading: false,
            sequencer: RequestSequencer::new(),
            applied: None,
            last_error: None,
        }
    }

    /// Signed-in viewer
    #[inline]
    #[must_use]
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Selected leg
    #[inline]
    #[must_use]
    pub fn leg(&self) -> Leg {
        self.leg
    }

    /// Unfiltered tree from the last applied fetch
    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<&HierarchyNode> {
        self.base.as_deref()
    }

    /// Whether a fetch is in flight
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Ticket of the fetch that produced the base tree
    #[inline]
    #[must_use]
    pub fn applied_ticket(&self) -> Option<RequestTicket> {
        self.applied
    }

    /// Message of the last failed fetch, cleared by the next success
    #[inline]
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Expansion state for tree rendering
    #[inline]
    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Search, level and page selection
    #[inline]
    #[must_use]
    pub fn table_state(&self) -> &TableState {
        &self.table
    }

    /// Switch leg; returns whether it changed
    ///
    /// A change collapses every node, returns to page 1 and supersedes any
    /// fetch still in flight. The caller fetches the new leg.
    pub fn select_leg(&mut self, leg: Leg) -> bool {
        if leg == self.leg {
            return false;
        }
        self.leg = leg;
        self.expansion.clear();
        self.table.reset_page();
        self.supersede();
        true
    }

    /// Switch viewer; returns whether it changed
    ///
    /// A change drops the base tree and supersedes any fetch in flight.
    pub fn set_viewer(&mut self, viewer: Viewer) -> bool {
        if viewer == self.viewer {
            return false;
        }
        self.viewer = viewer;
        self.base = None;
        self.applied = None;
        self.expansion.clear();
        self.table.reset_page();
        self.supersede();
        true
    }

    fn supersede(&mut self) {
        if self.loading {
            let ticket = self.sequencer.issue(self.leg);
            debug!(%ticket, "in-flight fetch superseded");
        }
        self.loading = false;
    }

    /// Set search text (shared by tree and table)
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.table.set_search(search);
    }

    /// Set level filter (shared by tree and table)
    pub fn set_level(&mut self, level: LevelFilter) {
        self.table.set_level(level);
    }

    /// Jump to a table page
    pub fn set_page(&mut self, page: usize) {
        self.table.set_page(page);
    }

    /// Flip one node's expanded flag
    pub fn toggle(&mut self, key: &ExpansionKey) -> bool {
        self.expansion.toggle(key)
    }

    /// Expand every parent in the current tree view
    pub fn expand_all(&mut self) {
        let snapshot = self.tree();
        self.expansion.expand_all(&snapshot.roots);
    }

    /// Collapse everything
    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// Start a fetch for the current leg
    ///
    /// Issuing a ticket supersedes every earlier in-flight fetch.
    pub fn begin_fetch(&mut self) -> RequestTicket {
        let ticket = self.sequencer.issue(self.leg);
        self.loading = true;
        debug!(%ticket, viewer = %self.viewer.id, "fetch started");
        ticket
    }

    /// Apply a completed fetch if it is still the newest
    pub fn apply_fetch(
        &mut self,
        ticket: RequestTicket,
        result: ClientResult<FetchOutcome<Arc<HierarchyNode>>>,
    ) -> ApplyOutcome {
        if !self.sequencer.is_current(ticket) {
            debug!(%ticket, latest = self.sequencer.latest(), "discarding stale response");
            return ApplyOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(FetchOutcome::Fetched(tree)) => {
                self.base = Some(tree);
                self.applied = Some(ticket);
                self.last_error = None;
                self.expansion.clear();
                self.table.reset_page();
                ApplyOutcome::Applied
            }
            Ok(FetchOutcome::Skipped) => ApplyOutcome::Skipped,
            Err(e) => {
                warn!(%ticket, error = %e, "keeping previous team after failed fetch");
                self.last_error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Tree view: search, then level slice
    #[must_use]
    pub fn tree(&self) -> TreeSnapshot {
        let Some(base) = self.base() else {
            return TreeSnapshot::default();
        };
        let Some(found) = filter_tree(base, self.table.search()) else {
            return TreeSnapshot::default();
        };
        let roots = vec![found];
        let sliced = filter_by_level(&roots, self.table.level(), 0).into_owned();
        TreeSnapshot { roots: sliced }
    }

    /// Table view: flatten, filter and paginate
    #[must_use]
    pub fn table_page(&self) -> TableSnapshot<'_> {
        let rows = self
            .base()
            .map(|base| flatten(std::slice::from_ref(base), 0))
            .unwrap_or_default();
        let (page_rows, total_rows) = self.table.apply(&rows);
        TableSnapshot {
            rows: page_rows,
            page: self.table.page(),
            page_size: self.table.page_size(),
            total_rows,
        }
    }

    /// Deepest traversal depth of the base tree
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.base().map_or(0, HierarchyNode::max_depth)
    }

    /// Options for the level selector
    #[must_use]
    pub fn level_options(&self) -> Vec<LevelFilter> {
        level_options(self.max_level())
    }

    /// Member counts for the base tree
    #[must_use]
    pub fn member_stats(&self) -> MemberStats {
        self.base().map(HierarchyNode::member_stats).unwrap_or_default()
    }
}
