//! Leg business summaries and top-performer detection

use crate::wire;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business figures for one member of a leg
///
/// Column names follow the leg-view endpoint (`ProAmount`, `ExpressAmount`,
/// `totalteamBusiness`, `selfBusiness`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegBusinessSummary {
    /// Member login name, when supplied
    #[serde(default, deserialize_with = "wire::opt_text", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Member display name, when supplied
    #[serde(default, deserialize_with = "wire::opt_text", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,

    /// Pro plan volume
    #[serde(rename = "ProAmount", default, deserialize_with = "wire::decimal_or_zero")]
    pub pro_amount: Decimal,

    /// Express plan volume
    #[serde(rename = "ExpressAmount", default, deserialize_with = "wire::decimal_or_zero")]
    pub express_amount: Decimal,

    /// Volume of the member's own team
    #[serde(rename = "totalteamBusiness", default, deserialize_with = "wire::decimal_or_zero")]
    pub total_team_business: Decimal,

    /// Member's own volume
    #[serde(rename = "selfBusiness", default, deserialize_with = "wire::decimal_or_zero")]
    pub self_business: Decimal,
}

impl LegBusinessSummary {
    /// Create entry from the three ranked columns
    #[must_use]
    pub fn new(pro_amount: Decimal, express_amount: Decimal, total_team_business: Decimal) -> Self {
        Self {
            pro_amount,
            express_amount,
            total_team_business,
            ..Self::default()
        }
    }

    /// With member name
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Ranking figure: pro + express + team business
    #[inline]
    #[must_use]
    pub fn combined_business(&self) -> Decimal {
        self.pro_amount
            .saturating_add(self.express_amount)
            .saturating_add(self.total_team_business)
    }

    /// Display name, if any identity was supplied
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.nickname.as_deref().or(self.username.as_deref())
    }
}

/// Largest combined business in the list (zero when empty)
#[must_use]
pub fn max_combined_business(entries: &[LegBusinessSummary]) -> Decimal {
    entries
        .iter()
        .map(LegBusinessSummary::combined_business)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// The value an entry must equal to be highlighted
///
/// `None` when the maximum is not strictly positive, so an all-zero leg
/// highlights nobody.
#[must_use]
pub fn top_performer_threshold(entries: &[LegBusinessSummary]) -> Option<Decimal> {
    let max = max_combined_business(entries);
    (max > Decimal::ZERO).then_some(max)
}

/// Highlight flag per entry; every entry tied at the maximum is marked
#[must_use]
pub fn mark_top_performers(entries: &[LegBusinessSummary]) -> Vec<bool> {
    let threshold = top_performer_threshold(entries);
    entries
        .iter()
        .map(|e| threshold.is_some_and(|max| e.combined_business() == max))
        .collect()
}

/// Indices of highlighted entries
#[must_use]
pub fn top_performers(entries: &[LegBusinessSummary]) -> Vec<usize> {
    mark_top_performers(entries)
        .into_iter()
        .enumerate()
        .filter_map(|(i, marked)| marked.then_some(i))
        .collect()
}

/// Column totals across a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LegTotals {
    /// Entries summed
    pub members: usize,
    /// Sum of `ProAmount`
    pub pro_amount: Decimal,
    /// Sum of `ExpressAmount`
    pub express_amount: Decimal,
    /// Sum of `totalteamBusiness`
    pub total_team_business: Decimal,
    /// Sum of `selfBusiness`
    pub self_business: Decimal,
}

impl LegTotals {
    /// Sum every column
    #[must_use]
    pub fn from_entries(entries: &[LegBusinessSummary]) -> Self {
        entries.iter().fold(Self::default(), |acc, e| Self {
            members: acc.members + 1,
            pro_amount: acc.pro_amount.saturating_add(e.pro_amount),
            express_amount: acc.express_amount.saturating_add(e.express_amount),
            total_team_business: acc.total_team_business.saturating_add(e.total_team_business),
            self_business: acc.self_business.saturating_add(e.self_business),
        })
    }
}
