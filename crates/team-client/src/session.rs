//! Session credential

use std::fmt::{self, Debug, Formatter};

/// Opaque session credential sent with every backend request
///
/// Never printed: `Debug` redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a credential; blank input means "no session"
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Read a credential from an environment variable
    #[must_use]
    pub fn from_env(var: &str) -> Option<Self> {
        std::env::var(var).ok().and_then(Self::new)
    }

    /// Raw credential for the request header
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for SessionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}
