use gloo::net::http::Request;

use crate::domain::errors::{AppError, NetworkResult};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::MarketSnapshot;
use crate::infrastructure::http::dto::MarketMetricsResponse;

/// HTTP client for the game backend's market-metrics endpoint, built on gloo.
pub struct MarketMetricsClient {
    base_url: String,
}

impl MarketMetricsClient {
    /// Same-origin client; the analytics view normally ships with the page
    /// it is embedded in.
    pub fn new() -> Self {
        Self { base_url: String::new() }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn metrics_url(&self, token: &str) -> String {
        format!("{}/api/market-metrics/{}", self.base_url, token)
    }

    /// Fetch and decode one full analytics snapshot for a participant token.
    pub async fn fetch_snapshot(&self, token: &str) -> NetworkResult<MarketSnapshot> {
        let url = self.metrics_url(token);

        get_logger().debug(
            LogComponent::Infrastructure("MetricsHTTP"),
            &format!("📡 Fetching market metrics: {}", url),
        );

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Request failed: {:?}", e)))?;

        if !response.ok() {
            return Err(AppError::NetworkError(format!(
                "HTTP error {} from {}",
                response.status(),
                url
            )));
        }

        let payload = response
            .json::<MarketMetricsResponse>()
            .await
            .map_err(|e| AppError::ParseError(format!("Failed to parse JSON: {:?}", e)))?;

        let snapshot = payload.into_domain()?;

        get_logger().info(
            LogComponent::Infrastructure("MetricsHTTP"),
            &format!(
                "✅ Snapshot received: {} players, {} trades, {} shares traded",
                snapshot.metrics.len(),
                snapshot.overview.total_trades,
                snapshot.overview.total_volume
            ),
        );

        Ok(snapshot)
    }
}

impl Default for MarketMetricsClient {
    fn default() -> Self {
        Self::new()
    }
}
