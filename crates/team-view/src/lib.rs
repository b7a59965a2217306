//! Team View - state and rendering for the team hierarchy screen
//!
//! Ties the pure views from `team-hierarchy` to the fetcher from
//! `team-client`:
//! - [`TeamView`] owns the base tree and derives tree and table views
//! - [`TeamDashboard`] runs fetches and drops superseded responses
//! - [`LegSummaryView`] ranks leg business and totals it
//! - [`render`] turns all of the above into terminal text

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod dashboard;
pub mod render;
pub mod summary;
pub mod view;

// Re-exports for convenience
pub use dashboard::TeamDashboard;
pub use render::{render_legs, render_table, render_tree};
pub use summary::LegSummaryView;
pub use view::{ApplyOutcome, TableSnapshot, TeamView, TreeSnapshot};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
