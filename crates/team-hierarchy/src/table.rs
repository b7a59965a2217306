//! Table mode: row filtering and client-side pagination
//!
//! Rows come from [`flatten`](crate::flatten::flatten); the search and level
//! filters here are applied to the flat list itself rather than reusing the
//! tree filters, so a row survives on its own merits.

use crate::flatten::FlatRow;
use crate::level::LevelFilter;

/// Rows per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter flat rows by level equality and display-name substring
#[must_use]
pub fn filter_rows<'a>(rows: &[FlatRow<'a>], search: &str, level: LevelFilter) -> Vec<FlatRow<'a>> {
    let needle = search.to_lowercase();
    rows.iter()
        .filter(|row| level.admits(row.level))
        .filter(|row| needle.is_empty() || row.display_name().to_lowercase().contains(&needle))
        .copied()
        .collect()
}

/// One page of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'s, T> {
    /// Rows on this page (empty when out of range)
    pub items: &'s [T],
    /// 1-based page index requested
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
    /// Rows before slicing
    pub total_rows: usize,
}

impl<T> Page<'_, T> {
    /// Number of pages needed for all rows
    #[inline]
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_rows.div_ceil(self.page_size)
        }
    }

    /// Whether a later page exists
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Slice out page `page` (1-based); out-of-range pages are empty
#[must_use]
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let items = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(page_size))
        .filter(|start| page_size > 0 && *start < rows.len())
        .map_or(&rows[..0], |start| {
            let end = start.saturating_add(page_size).min(rows.len());
            &rows[start..end]
        });

    Page {
        items,
        page,
        page_size,
        total_rows: rows.len(),
    }
}

/// Search, level and page selection for the table view
///
/// Changing the search text or the level moves back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    search: String,
    level: LevelFilter,
    page: usize,
    page_size: usize,
}

impl TableState {
    /// Create state on page 1 with no filters
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            level: LevelFilter::All,
            page: 1,
            page_size,
        }
    }

    /// Current search text
    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current level filter
    #[inline]
    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Current 1-based page
    #[inline]
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page
    #[inline]
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set search text; resets to page 1 when it changes
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Set level filter; resets to page 1 when it changes
    pub fn set_level(&mut self, level: LevelFilter) {
        if level != self.level {
            self.level = level;
            self.page = 1;
        }
    }

    /// Jump to a page (not clamped; out-of-range pages render empty)
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Back to page 1
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Filter rows and slice out the current page
    #[must_use]
    pub fn apply<'a>(&self, rows: &[FlatRow<'a>]) -> (Vec<FlatRow<'a>>, usize) {
        let filtered = filter_rows(rows, &self.search, self.level);
        let total = filtered.len();
        let page = paginate(&filtered, self.page, self.page_size).items.to_vec();
        (page, total)
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::node::HierarchyNode;

    #[test]
    fn paginate_slices() {
        let rows: Vec<u32> = (1..=25).collect();
        let page = paginate(&rows, 3, 10);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
    }

    #[test]
    fn paginate_out_of_range_is_empty() {
        let rows: Vec<u32> = (1..=5).collect();
        assert!(paginate(&rows, 0, 10).items.is_empty());
        assert!(paginate(&rows, 2, 10).items.is_empty());
        assert!(paginate(&rows, usize::MAX, 10).items.is_empty());
        assert!(paginate(&rows, 1, 0).items.is_empty());
    }

    #[test]
    fn filter_rows_by_level_and_name() {
        let root = HierarchyNode::member("root")
            .with_child(HierarchyNode::member("ann").with_child(HierarchyNode::member("annie")))
            .with_child(HierarchyNode::member("bob"));
        let rows = flatten(std::slice::from_ref(&root), 0);

        let by_name: Vec<_> = filter_rows(&rows, "ANN", LevelFilter::All)
            .iter()
            .map(|r| r.display_name().to_string())
            .collect();
        assert_eq!(by_name, ["ann", "annie"]);

        let by_level = filter_rows(&rows, "ann", LevelFilter::Exactly(2));
        assert_eq!(by_level.len(), 1);
        assert_eq!(by_level[0].display_name(), "annie");
    }

    #[test]
    fn changing_filters_resets_page() {
        let mut state = TableState::default();
        state.set_page(4);
        state.set_search("x");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.set_search("x");
        assert_eq!(state.page(), 3, "unchanged search keeps the page");

        state.set_level(LevelFilter::Exactly(1));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn apply_reports_total_before_paging() {
        let mut root = HierarchyNode::member("root");
        for i in 0..12 {
            root = root.with_child(HierarchyNode::member(format!("m{i}")));
        }
        let rows = flatten(std::slice::from_ref(&root), 0);
        let mut state = TableState::new(5);
        state.set_level(LevelFilter::Exactly(1));
        state.set_page(3);

        let (page, total) = state.apply(&rows);
        assert_eq!(total, 12);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].display_name(), "m10");
    }
}
