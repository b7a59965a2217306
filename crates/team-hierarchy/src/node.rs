//! Referral hierarchy nodes
//!
//! Provides [`HierarchyNode`], one member of the referral network together
//! with the members it sponsored, and [`Viewer`], the identity used for the
//! synthetic root of every fetched tree.

use crate::error::{HierarchyError, HierarchyResult};
use crate::wire;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One member of the referral network
///
/// A node exclusively owns its children; the structure is a strict tree.
/// Field names follow the backend's JSON (`planSubscription`, `planPrice`,
/// `child`, `isRoot`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    /// Backend identifier, when supplied
    #[serde(
        default,
        alias = "_id",
        deserialize_with = "wire::opt_identifier",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Login name
    #[serde(default, alias = "userName", deserialize_with = "wire::text_or_empty")]
    pub username: String,

    /// Preferred display name
    #[serde(
        default,
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub nickname: Option<String>,

    /// Separately supplied full name
    #[serde(
        default,
        alias = "fullname",
        deserialize_with = "wire::opt_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,

    /// Distance from the root (root = 0)
    #[serde(default, deserialize_with = "wire::level_or_zero")]
    pub level: u32,

    /// Active investment subscription
    #[serde(default, deserialize_with = "wire::flag_or_false")]
    pub plan_subscription: bool,

    /// Subscribed plan amount
    #[serde(default, deserialize_with = "wire::decimal_or_zero")]
    pub plan_price: Decimal,

    /// Directly sponsored members, in backend order
    #[serde(default, deserialize_with = "wire::vec_or_empty")]
    pub child: Vec<HierarchyNode>,

    /// Set only on the synthetic node standing for the viewer
    #[serde(default, deserialize_with = "wire::flag_or_false")]
    pub is_root: bool,
}

impl HierarchyNode {
    /// Create a leaf member
    #[must_use]
    pub fn member(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Wrap backend members under a synthetic root for the viewer
    #[must_use]
    pub fn synthetic_root(viewer: &Viewer, members: Vec<HierarchyNode>) -> Self {
        Self {
            id: Some(viewer.id.clone()),
            username: viewer.username.clone(),
            nickname: viewer.nickname.clone(),
            full_name: viewer.full_name.clone(),
            level: 0,
            plan_subscription: viewer.plan_subscription,
            plan_price: viewer.plan_price,
            child: members,
            is_root: true,
        }
    }

    /// With identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// With nickname
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// With full name
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// With stored level
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// With plan subscription and price
    #[must_use]
    pub fn with_plan(mut self, active: bool, price: Decimal) -> Self {
        self.plan_subscription = active;
        self.plan_price = price;
        self
    }

    /// With an appended child
    #[must_use]
    pub fn with_child(mut self, child: HierarchyNode) -> Self {
        self.child.push(child);
        self
    }

    /// Copy of this node's own fields carrying the given children
    #[must_use]
    pub fn with_children_replaced(&self, child: Vec<HierarchyNode>) -> Self {
        Self {
            id: self.id.clone(),
            username: self.username.clone(),
            nickname: self.nickname.clone(),
            full_name: self.full_name.clone(),
            level: self.level,
            plan_subscription: self.plan_subscription,
            plan_price: self.plan_price,
            child,
            is_root: self.is_root,
        }
    }

    /// Nickname, falling back to username
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(self.username.as_str())
    }

    /// Check display name against an already lowercased needle
    #[inline]
    pub(crate) fn matches_lowered(&self, needle: &str) -> bool {
        needle.is_empty() || self.display_name().to_lowercase().contains(needle)
    }

    /// Whether the node has any children
    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.child.is_empty()
    }

    /// Total nodes in this subtree, self included
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.child.iter().map(Self::node_count).sum::<usize>()
    }

    /// Deepest traversal depth below this node (a leaf is 0)
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.child
            .iter()
            .map(|c| c.max_depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Membership figures for the subtree, excluding the synthetic root
    #[must_use]
    pub fn member_stats(&self) -> MemberStats {
        let mut stats = MemberStats::default();
        self.accumulate_stats(&mut stats);
        stats
    }

    fn accumulate_stats(&self, stats: &mut MemberStats) {
        if !self.is_root {
            stats.members += 1;
            if self.plan_subscription {
                stats.active += 1;
            }
            stats.plan_volume = stats.plan_volume.saturating_add(self.plan_price);
        }
        for child in &self.child {
            child.accumulate_stats(stats);
        }
    }

    /// Check the level invariant: each child sits one level below its parent
    ///
    /// # Errors
    /// - `HierarchyError::LevelMismatch` for the first node out of place
    /// - `HierarchyError::MisplacedRoot` if a root marker appears below the top
    pub fn validate_levels(&self) -> HierarchyResult<()> {
        if self.is_root && self.level != 0 {
            return Err(HierarchyError::level_mismatch(&self.username, 0, self.level));
        }
        self.validate_children()
    }

    fn validate_children(&self) -> HierarchyResult<()> {
        for child in &self.child {
            if child.is_root {
                return Err(HierarchyError::MisplacedRoot(child.username.clone()));
            }
            let expected = self.level + 1;
            if child.level != expected {
                return Err(HierarchyError::level_mismatch(
                    &child.username,
                    expected,
                    child.level,
                ));
            }
            child.validate_children()?;
        }
        Ok(())
    }
}

/// Membership figures for a subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberStats {
    /// Members counted (synthetic root excluded)
    pub members: usize,
    /// Members with an active subscription
    pub active: usize,
    /// Sum of plan prices
    pub plan_volume: Decimal,
}

impl MemberStats {
    /// Members without an active subscription
    #[inline]
    #[must_use]
    pub fn inactive(&self) -> usize {
        self.members - self.active
    }
}

/// The signed-in user whose team is being viewed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    /// Backend identifier
    pub id: String,
    /// Login name
    pub username: String,
    /// Preferred display name
    #[serde(default)]
    pub nickname: Option<String>,
    /// Full name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Active investment subscription
    #[serde(default)]
    pub plan_subscription: bool,
    /// Subscribed plan amount
    #[serde(default)]
    pub plan_price: Decimal,
}

impl Viewer {
    /// Create viewer with identity only
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            nickname: None,
            full_name: None,
            plan_subscription: false,
            plan_price: Decimal::ZERO,
        }
    }

    /// With nickname
    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    /// With full name
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// With plan subscription and price
    #[must_use]
    pub fn with_plan(mut self, active: bool, price: Decimal) -> Self {
        self.plan_subscription = active;
        self.plan_price = price;
        self
    }
}
