//! Trending topics endpoint

use crate::ServiceClient;
use crate::TRENDING_TIMEOUT;
use crate::error::Result;
use rdip_core::domain::job::TrendingResult;
use rdip_core::dto::trending::TrendingQuery;

impl ServiceClient {
    /// Fetch trending topics for a subreddit
    ///
    /// Fetched once; the payload is returned as-is.
    pub async fn trending(&self, query: &TrendingQuery) -> Result<TrendingResult> {
        let url = self.endpoint(&["v1", "trending", query.subreddit()])?;
        let response = self
            .client
            .get(url)
            .timeout(TRENDING_TIMEOUT)
            .query(&[
                ("period", query.period.as_str().to_string()),
                ("limit", query.limit.to_string()),
            ])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
