//! Team Client - backend access for the team dashboard
//!
//! Fetches referral trees and leg business figures:
//! - [`ClientConfig`] loaded from TOML with environment overrides
//! - [`TeamBackend`] abstraction with the [`HttpBackend`] implementation
//! - [`HierarchyCache`] keyed by (viewer, leg) using moka
//! - [`HierarchyFetcher`] wrapping members under the viewer root
//! - [`RequestSequencer`] tickets for discarding superseded responses
//!
//! # Example
//!
//! ```rust,no_run
//! use team_client::prelude::*;
//! use team_hierarchy::{Leg, Viewer};
//!
//! # async fn run() -> Result<(), ClientError> {
//! let config = ClientConfig::new("https://api.example.com").apply_env();
//! let cache = HierarchyCache::from_config(&config);
//! let fetcher = HierarchyFetcher::new(HttpBackend::new(config)?, cache);
//!
//! let session = SessionToken::new("token-value");
//! let viewer = Viewer::new("42", "me");
//! if let FetchOutcome::Fetched(tree) = fetcher.fetch(&viewer, Leg::A, session.as_ref()).await? {
//!     println!("{} members", tree.node_count() - 1);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod payload;
pub mod sequence;
pub mod session;

// Re-exports for convenience
#[cfg(any(test, feature = "mock"))]
pub use backend::MockTeamBackend;
pub use backend::{DateRange, HttpBackend, TeamBackend};
pub use cache::{CacheStats, HierarchyCache, HierarchyKey};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ConfigError};
pub use fetcher::{FetchOutcome, HierarchyFetcher};
pub use sequence::{RequestSequencer, RequestTicket};
pub use session::SessionToken;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for talking to the team backend
    pub use crate::backend::{DateRange, HttpBackend, TeamBackend};
    pub use crate::cache::HierarchyCache;
    pub use crate::config::ClientConfig;
    pub use crate::error::{ClientError, ClientResult};
    pub use crate::fetcher::{FetchOutcome, HierarchyFetcher};
    pub use crate::sequence::{RequestSequencer, RequestTicket};
    pub use crate::session::SessionToken;
}
