//! Leg selector for the team tabs

use crate::error::HierarchyError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Which referral branch to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Leg {
    /// Both branches
    #[default]
    #[serde(rename = "ALL")]
    All,
    /// Left branch ("Team A")
    #[serde(rename = "A")]
    A,
    /// Right branch ("Team B")
    #[serde(rename = "B")]
    B,
}

impl Leg {
    /// Tab order
    pub const TABS: [Leg; 3] = [Leg::All, Leg::A, Leg::B];

    /// Value sent in the `leg` query parameter
    #[inline]
    #[must_use]
    pub const fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Tab label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::A => "Team A",
            Self::B => "Team B",
        }
    }
}

impl Display for Leg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl FromStr for Leg {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "a" | "team-a" | "teama" => Ok(Self::A),
            "b" | "team-b" | "teamb" => Ok(Self::B),
            _ => Err(HierarchyError::UnknownLeg(s.to_string())),
        }
    }
}
