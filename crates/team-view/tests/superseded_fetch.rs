//! A slow fetch for one leg must not overwrite a newer leg's tree.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use team_client::{
    ClientResult, DateRange, HierarchyCache, HierarchyFetcher, SessionToken, TeamBackend,
};
use team_hierarchy::{HierarchyNode, Leg, LegBusinessSummary};
use team_test_utils::{member, sample_viewer};
use team_view::{ApplyOutcome, TeamDashboard};
use tokio::sync::Notify;

/// Leg A blocks until the gate opens; other legs answer at once
struct GatedBackend {
    gate: Arc<Notify>,
}

#[async_trait]
impl TeamBackend for GatedBackend {
    async fn team_list(&self, _session: &SessionToken, leg: Leg) -> ClientResult<Vec<HierarchyNode>> {
        if leg == Leg::A {
            self.gate.notified().await;
        }
        Ok(vec![member("1", &format!("{leg}-member"), 1)])
    }

    async fn leg_business(
        &self,
        _session: &SessionToken,
        _range: &DateRange,
    ) -> ClientResult<Vec<LegBusinessSummary>> {
        Ok(Vec::new())
    }
}

fn dashboard(gate: &Arc<Notify>) -> Arc<TeamDashboard<GatedBackend>> {
    let backend = GatedBackend {
        gate: Arc::clone(gate),
    };
    Arc::new(TeamDashboard::new(
        HierarchyFetcher::new(backend, HierarchyCache::new(8)),
        sample_viewer(),
        SessionToken::new("tok"),
        10,
    ))
}

#[tokio::test]
async fn late_response_for_previous_leg_is_discarded() {
    let gate = Arc::new(Notify::new());
    let dash = dashboard(&gate);

    let slow = tokio::spawn({
        let dash = Arc::clone(&dash);
        async move { dash.select_leg(Leg::A).await }
    });
    while !dash.view().is_loading() {
        tokio::task::yield_now().await;
    }

    assert_eq!(dash.select_leg(Leg::B).await, Some(ApplyOutcome::Applied));
    gate.notify_one();
    assert_eq!(slow.await.unwrap(), Some(ApplyOutcome::Stale));

    let view = dash.view();
    assert_eq!(view.leg(), Leg::B);
    assert!(!view.is_loading());
    let base = view.base().unwrap();
    assert_eq!(base.child[0].username, "B-member");
    assert_eq!(view.applied_ticket().map(|t| t.leg()), Some(Leg::B));
}

#[tokio::test]
async fn returning_to_cached_leg_applies_immediately() {
    let gate = Arc::new(Notify::new());
    let dash = dashboard(&gate);

    assert_eq!(dash.load().await, ApplyOutcome::Applied);
    assert_eq!(dash.select_leg(Leg::B).await, Some(ApplyOutcome::Applied));
    assert_eq!(dash.select_leg(Leg::All).await, Some(ApplyOutcome::Applied));

    let view = dash.view();
    assert_eq!(view.base().unwrap().child[0].username, "ALL-member");
    assert!(view.expansion().is_empty());
}
