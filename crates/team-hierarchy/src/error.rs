//! Error types for the hierarchy model
//!
//! Covers:
//! - Selector parsing (leg tabs, level options)
//! - Level invariant checks on fetched trees

/// Errors raised by hierarchy parsing and validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// Leg selector string not recognised
    #[error("unknown leg: '{0}'")]
    UnknownLeg(String),

    /// Level filter string is neither "all" nor a depth
    #[error("invalid level filter: '{0}'")]
    InvalidLevel(String),

    /// A node's level is not its parent's level plus one
    #[error("level mismatch at '{username}': expected {expected}, found {found}")]
    LevelMismatch {
        /// Member whose level is off
        username: String,
        /// Parent level plus one
        expected: u32,
        /// Level carried by the node
        found: u32,
    },

    /// Root marker found below the top of the tree
    #[error("root marker on non-root node '{0}'")]
    MisplacedRoot(String),
}

impl HierarchyError {
    /// Create level mismatch error
    pub fn level_mismatch(username: impl Into<String>, expected: u32, found: u32) -> Self {
        Self::LevelMismatch {
            username: username.into(),
            expected,
            found,
        }
    }
}

/// Result type alias for hierarchy operations
pub type HierarchyResult<T> = Result<T, HierarchyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_leg_display() {
        let err = HierarchyError::UnknownLeg("left".to_string());
        assert_eq!(err.to_string(), "unknown leg: 'left'");
    }

    #[test]
    fn level_mismatch_display() {
        let err = HierarchyError::level_mismatch("jane", 2, 5);
        assert_eq!(
            err.to_string(),
            "level mismatch at 'jane': expected 2, found 5"
        );
    }
}
