//! Dashboard driver: fetch, then apply to the shared view
//!
//! The view lock is only taken for the synchronous begin/apply steps and is
//! never held across a backend call, so a leg switch issued while a fetch is
//! in flight supersedes it instead of waiting for it.

use crate::summary::LegSummaryView;
use crate::view::{ApplyOutcome, TeamView};
use parking_lot::{Mutex, MutexGuard};
use team_client::{
    ClientResult, DateRange, FetchOutcome, HierarchyFetcher, HierarchyKey, SessionToken,
    TeamBackend,
};
use team_hierarchy::{Leg, Viewer};
use tracing::info;

/// Team hierarchy screen bound to a backend
#[derive(Debug)]
pub struct TeamDashboard<B> {
    fetcher: HierarchyFetcher<B>,
    session: Option<SessionToken>,
    view: Mutex<TeamView>,
}

impl<B: TeamBackend> TeamDashboard<B> {
    /// Create dashboard for a viewer; nothing is fetched yet
    #[must_use]
    pub fn new(
        fetcher: HierarchyFetcher<B>,
        viewer: Viewer,
        session: Option<SessionToken>,
        page_size: usize,
    ) -> Self {
        Self {
            fetcher,
            session,
            view: Mutex::new(TeamView::new(viewer, page_size)),
        }
    }

    /// Lock the view for reading or synchronous edits
    ///
    /// Do not hold the guard across `.await`.
    pub fn view(&self) -> MutexGuard<'_, TeamView> {
        self.view.lock()
    }

    /// Fetcher in use
    #[inline]
    #[must_use]
    pub fn fetcher(&self) -> &HierarchyFetcher<B> {
        &self.fetcher
    }

    /// Fetch the current leg and apply it if still current
    pub async fn load(&self) -> ApplyOutcome {
        let (viewer, leg, ticket) = {
            let mut view = self.view.lock();
            let ticket = view.begin_fetch();
            (view.viewer().clone(), view.leg(), ticket)
        };

        let result = self.fetcher.fetch(&viewer, leg, self.session.as_ref()).await;

        let outcome = self.view.lock().apply_fetch(ticket, result);
        info!(%ticket, ?outcome, "team load finished");
        outcome
    }

    /// Switch leg and fetch it
    ///
    /// Reselecting the current leg is a no-op and returns `None`.
    pub async fn select_leg(&self, leg: Leg) -> Option<ApplyOutcome> {
        if !self.view.lock().select_leg(leg) {
            return None;
        }
        Some(self.load().await)
    }

    /// Switch viewer and fetch their team
    pub async fn set_viewer(&self, viewer: Viewer) -> Option<ApplyOutcome> {
        if !self.view.lock().set_viewer(viewer) {
            return None;
        }
        Some(self.load().await)
    }

    /// Drop the cached tree for the current leg and fetch again
    pub async fn refresh(&self) -> ApplyOutcome {
        let key = {
            let view = self.view.lock();
            HierarchyKey::new(view.viewer(), view.leg())
        };
        self.fetcher.cache().invalidate(&key).await;
        self.load().await
    }

    /// Load leg business and rank it
    ///
    /// Returns `Ok(None)` without a session.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn leg_summary(&self, range: &DateRange) -> ClientResult<Option<LegSummaryView>> {
        let outcome = self
            .fetcher
            .fetch_leg_business(self.session.as_ref(), range)
            .await?;
        Ok(match outcome {
            FetchOutcome::Fetched(entries) => Some(LegSummaryView::new(entries)),
            FetchOutcome::Skipped => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use team_client::{ClientError, HierarchyCache, MockTeamBackend};
    use team_test_utils::{john_jane_members, sample_viewer, summary};

    fn dashboard(backend: MockTeamBackend, session: bool) -> TeamDashboard<MockTeamBackend> {
        TeamDashboard::new(
            HierarchyFetcher::new(backend, HierarchyCache::new(8)),
            sample_viewer(),
            session.then(|| SessionToken::new("tok").unwrap()),
            10,
        )
    }

    #[tokio::test]
    async fn load_installs_tree() {
        let mut backend = MockTeamBackend::new();
        backend.expect_team_list().returning(|_, _| Ok(john_jane_members()));
        let dash = dashboard(backend, true);

        assert_eq!(dash.load().await, ApplyOutcome::Applied);
        let view = dash.view();
        assert_eq!(view.base().map(|t| t.node_count()), Some(4));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn no_session_skips() {
        let mut backend = MockTeamBackend::new();
        backend.expect_team_list().never();
        let dash = dashboard(backend, false);

        assert_eq!(dash.load().await, ApplyOutcome::Skipped);
        assert!(dash.view().base().is_none());
        assert_eq!(dash.leg_summary(&DateRange::unbounded()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn same_leg_does_not_refetch() {
        let mut backend = MockTeamBackend::new();
        backend.expect_team_list().times(2).returning(|_, _| Ok(john_jane_members()));
        let dash = dashboard(backend, true);

        dash.load().await;
        assert_eq!(dash.select_leg(Leg::All).await, None);
        assert_eq!(dash.select_leg(Leg::A).await, Some(ApplyOutcome::Applied));
        assert_eq!(dash.view().leg(), Leg::A);
    }

    #[tokio::test]
    async fn viewer_change_refetches_under_new_key() {
        let mut backend = MockTeamBackend::new();
        backend.expect_team_list().times(2).returning(|_, _| Ok(john_jane_members()));
        let dash = dashboard(backend, true);

        dash.load().await;
        {
            let mut view = dash.view();
            view.expand_all();
            view.set_page(2);
        }
        assert_eq!(dash.set_viewer(sample_viewer()).await, None);

        let other = Viewer::new("200", "other");
        assert_eq!(dash.set_viewer(other.clone()).await, Some(ApplyOutcome::Applied));
        assert!(dash.fetcher().cache().contains(&HierarchyKey::new(&other, Leg::All)).await);

        let view = dash.view();
        let base = view.base().unwrap();
        assert_eq!(base.id.as_deref(), Some("200"));
        assert_eq!(base.username, "other");
        assert!(view.expansion().is_empty());
        assert_eq!(view.table_state().page(), 1);
    }

    #[tokio::test]
    async fn refresh_bypasses_cache() {
        let mut backend = MockTeamBackend::new();
        backend.expect_team_list().times(2).returning(|_, _| Ok(john_jane_members()));
        let dash = dashboard(backend, true);

        dash.load().await;
        dash.load().await;
        assert_eq!(dash.refresh().await, ApplyOutcome::Applied);
    }

    #[tokio::test]
    async fn failed_load_keeps_tree() {
        let mut backend = MockTeamBackend::new();
        backend
            .expect_team_list()
            .with(mockall::predicate::always(), mockall::predicate::eq(Leg::All))
            .returning(|_, _| Ok(john_jane_members()));
        backend
            .expect_team_list()
            .with(mockall::predicate::always(), mockall::predicate::eq(Leg::B))
            .returning(|_, _| Err(ClientError::status("http://x/user/team-list", 500)));
        let dash = dashboard(backend, true);

        dash.load().await;
        assert_eq!(dash.select_leg(Leg::B).await, Some(ApplyOutcome::Failed));

        let view = dash.view();
        assert_eq!(view.base().map(|t| t.child.len()), Some(2));
        assert!(view.last_error().is_some());
    }

    #[tokio::test]
    async fn leg_summary_marks_leader() {
        let mut backend = MockTeamBackend::new();
        backend
            .expect_leg_business()
            .returning(|_, _| Ok(vec![summary("a", 5, 5, 0), summary("b", 1, 0, 0)]));
        let dash = dashboard(backend, true);

        let legs = dash.leg_summary(&DateRange::unbounded()).await.unwrap().unwrap();
        assert!(legs.is_top(0));
        assert!(!legs.is_top(1));
    }
}
