//! Leg business table with top-performer marks

use rust_decimal::Decimal;
use team_hierarchy::{mark_top_performers, top_performer_threshold, LegBusinessSummary, LegTotals};

/// Leg business entries with their marks and column totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegSummaryView {
    entries: Vec<LegBusinessSummary>,
    marks: Vec<bool>,
    totals: LegTotals,
}

impl LegSummaryView {
    /// Rank entries and total the columns
    #[must_use]
    pub fn new(entries: Vec<LegBusinessSummary>) -> Self {
        let marks = mark_top_performers(&entries);
        let totals = LegTotals::from_entries(&entries);
        Self {
            entries,
            marks,
            totals,
        }
    }

    /// Entries in backend order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[LegBusinessSummary] {
        &self.entries
    }

    /// Entries paired with their top-performer flag
    pub fn rows(&self) -> impl Iterator<Item = (&LegBusinessSummary, bool)> + '_ {
        self.entries.iter().zip(self.marks.iter().copied())
    }

    /// Whether the entry at `index` is a top performer
    #[inline]
    #[must_use]
    pub fn is_top(&self, index: usize) -> bool {
        self.marks.get(index).copied().unwrap_or(false)
    }

    /// Combined business every top performer reached, if anyone qualifies
    #[must_use]
    pub fn threshold(&self) -> Option<Decimal> {
        top_performer_threshold(&self.entries)
    }

    /// Column totals
    #[inline]
    #[must_use]
    pub fn totals(&self) -> &LegTotals {
        &self.totals
    }

    /// Whether the leg has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use team_test_utils::summary;

    #[test]
    fn marks_ties() {
        let view = LegSummaryView::new(vec![
            summary("a", 10, 0, 0),
            summary("b", 0, 20, 0),
            summary("c", 0, 0, 20),
        ]);
        let marked: Vec<bool> = view.rows().map(|(_, top)| top).collect();
        assert_eq!(marked, [false, true, true]);
        assert_eq!(view.threshold(), Some(Decimal::from(20)));
        assert_eq!(view.totals().members, 3);
    }

    #[test]
    fn all_zero_marks_nobody() {
        let view = LegSummaryView::new(vec![summary("a", 0, 0, 0)]);
        assert!(!view.is_top(0));
        assert_eq!(view.threshold(), None);
        assert!(!view.is_top(7));
    }

    #[test]
    fn empty_leg() {
        let view = LegSummaryView::new(Vec::new());
        assert!(view.is_empty());
        assert_eq!(view.rows().count(), 0);
    }
}
