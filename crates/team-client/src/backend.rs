//! Team backend abstraction and its HTTP implementation

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::payload;
use crate::session::SessionToken;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use team_hierarchy::{HierarchyNode, Leg, LegBusinessSummary};
use tracing::debug;

/// Date format of the `fromDate` / `toDate` query parameters
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Optional bounds for the leg business query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Unbounded range
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { from: None, to: None }
    }

    /// Create range from optional bounds
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidDateRange`] when `from` is after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> ClientResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ClientError::InvalidDateRange { from, to });
            }
        }
        Ok(Self { from, to })
    }

    /// Lower bound
    #[inline]
    #[must_use]
    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    /// Upper bound
    #[inline]
    #[must_use]
    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    /// Query parameters for the bounds that are set
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [("fromDate", self.from), ("toDate", self.to)]
            .into_iter()
            .filter_map(|(name, date)| date.map(|d| (name, d.format(QUERY_DATE_FORMAT).to_string())))
            .collect()
    }
}

/// Source of team data
///
/// Implementations return the member sequence as the backend sent it;
/// wrapping under the viewer root is the fetcher's job.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait TeamBackend: Send + Sync {
    /// Top-level members of one leg
    async fn team_list(&self, session: &SessionToken, leg: Leg) -> ClientResult<Vec<HierarchyNode>>;

    /// Per-member business figures within a date range
    async fn leg_business(
        &self,
        session: &SessionToken,
        range: &DateRange,
    ) -> ClientResult<Vec<LegBusinessSummary>>;
}

/// [`TeamBackend`] over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    /// Build backend from validated config
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for invalid config or
    /// [`ClientError::Setup`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Setup)?;
        Ok(Self { client, config })
    }

    /// Config this backend was built from
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an endpoint path, appended to the base path
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|_| ClientError::InvalidUrl(raw))
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionToken,
        query: &[(&str, String)],
    ) -> ClientResult<Vec<T>> {
        let url = self.endpoint(path)?;
        debug!(url = %url, ?query, "GET");

        let response = self
            .client
            .get(url.clone())
            .header(self.config.session_header.as_str(), session.expose())
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(url.as_str(), status.as_u16()));
        }

        let body = response.bytes().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        payload::decode_list(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl TeamBackend for HttpBackend {
    async fn team_list(&self, session: &SessionToken, leg: Leg) -> ClientResult<Vec<HierarchyNode>> {
        let query = [("leg", leg.as_query_value().to_string())];
        self.get_list(&self.config.team_list_path, session, &query).await
    }

    async fn leg_business(
        &self,
        session: &SessionToken,
        range: &DateRange,
    ) -> ClientResult<Vec<LegBusinessSummary>> {
        self.get_list(&self.config.leg_view_path, session, &range.query_pairs())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, QUERY_DATE_FORMAT).unwrap()
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        let err = DateRange::new(Some(date("2024-02-01")), Some(date("2024-01-01"))).unwrap_err();
        assert!(matches!(err, ClientError::InvalidDateRange { .. }));
    }

    #[test]
    fn range_query_pairs_skip_missing_bounds() {
        assert!(DateRange::unbounded().query_pairs().is_empty());

        let range = DateRange::new(Some(date("2024-01-01")), None).unwrap();
        assert_eq!(range.query_pairs(), vec![("fromDate", "2024-01-01".to_string())]);

        let same_day = DateRange::new(Some(date("2024-03-05")), Some(date("2024-03-05"))).unwrap();
        assert_eq!(same_day.query_pairs().len(), 2);
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        let backend = HttpBackend::new(ClientConfig::new("https://api.example.com/v1/")).unwrap();
        let url = backend.endpoint("/user/team-list").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/user/team-list");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = HttpBackend::new(ClientConfig::default().with_page_size(0)).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
