//! Hierarchy fetcher
//!
//! Loads a leg of the viewer's team, wraps it under the synthetic viewer
//! root and caches the result per (viewer, leg).

use crate::backend::{DateRange, TeamBackend};
use crate::cache::{HierarchyCache, HierarchyKey};
use crate::error::{ClientError, ClientResult};
use crate::session::SessionToken;
use std::sync::Arc;
use team_hierarchy::{HierarchyNode, Leg, LegBusinessSummary, Viewer};
use tracing::{debug, error, info};

/// Result of a fetch that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// No session credential; nothing was requested
    Skipped,
    /// Data from the backend or the cache
    Fetched(T),
}

impl<T> FetchOutcome<T> {
    /// Fetched value, if any
    #[inline]
    pub fn into_fetched(self) -> Option<T> {
        match self {
            Self::Fetched(value) => Some(value),
            Self::Skipped => None,
        }
    }

    /// Whether the fetch was skipped
    #[inline]
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// Fetches and caches team hierarchies
#[derive(Debug)]
pub struct HierarchyFetcher<B> {
    backend: B,
    cache: HierarchyCache,
}

impl<B: TeamBackend> HierarchyFetcher<B> {
    /// Create fetcher over a backend and cache
    #[must_use]
    pub fn new(backend: B, cache: HierarchyCache) -> Self {
        Self { backend, cache }
    }

    /// Backend in use
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Cache in use
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &HierarchyCache {
        &self.cache
    }

    /// Load the viewer's tree for a leg
    ///
    /// The members returned by the backend become the children of a
    /// synthetic root carrying the viewer's attributes, in backend order.
    ///
    /// # Errors
    ///
    /// Returns the backend error; nothing is cached on failure.
    pub async fn fetch(
        &self,
        viewer: &Viewer,
        leg: Leg,
        session: Option<&SessionToken>,
    ) -> ClientResult<FetchOutcome<Arc<HierarchyNode>>> {
        let Some(session) = session else {
            debug!(viewer = %viewer.id, %leg, "no session, skipping team fetch");
            return Ok(FetchOutcome::Skipped);
        };

        let mut missed = false;
        let tree = self
            .cache
            .get_or_fetch(HierarchyKey::new(viewer, leg), || {
                missed = true;
                async move {
                    let members = self.backend.team_list(session, leg).await?;
                    let root = HierarchyNode::synthetic_root(viewer, members);
                    if let Err(e) = root.validate_levels() {
                        debug!(viewer = %viewer.id, %leg, error = %e, "stored levels disagree with tree depth");
                    }
                    Ok::<_, ClientError>(root)
                }
            })
            .await
            .inspect_err(|e| error!(viewer = %viewer.id, %leg, error = %e, "team fetch failed"))?;

        if missed {
            info!(
                viewer = %viewer.id,
                %leg,
                members = tree.node_count().saturating_sub(1),
                cached = self.cache.stats().entry_count,
                "team fetched"
            );
        } else {
            debug!(viewer = %viewer.id, %leg, "team cache hit");
        }
        Ok(FetchOutcome::Fetched(tree))
    }

    /// Drop the cached tree and load it again
    ///
    /// # Errors
    ///
    /// Same as [`HierarchyFetcher::fetch`].
    pub async fn refresh(
        &self,
        viewer: &Viewer,
        leg: Leg,
        session: Option<&SessionToken>,
    ) -> ClientResult<FetchOutcome<Arc<HierarchyNode>>> {
        self.cache.invalidate(&HierarchyKey::new(viewer, leg)).await;
        self.fetch(viewer, leg, session).await
    }

    /// Load per-member leg business for a date range (not cached)
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn fetch_leg_business(
        &self,
        session: Option<&SessionToken>,
        range: &DateRange,
    ) -> ClientResult<FetchOutcome<Vec<LegBusinessSummary>>> {
        let Some(session) = session else {
            debug!("no session, skipping leg business fetch");
            return Ok(FetchOutcome::Skipped);
        };

        let entries = self
            .backend
            .leg_business(session, range)
            .await
            .inspect_err(|e| error!(error = %e, "leg business fetch failed"))?;

        info!(entries = entries.len(), from = ?range.from(), to = ?range.to(), "leg business fetched");
        Ok(FetchOutcome::Fetched(entries))
    }
}
