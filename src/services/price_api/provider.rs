//! HTTP price history provider

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::messages::MarketChartResponse;
use crate::config::EngineConfig;
use crate::error::FetchError;
use crate::models::price::{PriceSample, Timeframe};
use crate::services::market_data::PriceHistoryProvider;

pub struct HttpPriceHistoryProvider {
    client: reqwest::Client,
    base_url: String,
    vs_currency: String,
}

impl HttpPriceHistoryProvider {
    pub fn new(config: &EngineConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()?;
        Ok(Self::with_client(config.price_api_url.clone(), client).with_vs_currency(&config.vs_currency))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            vs_currency: "usd".to_string(),
        }
    }

    pub fn with_vs_currency(mut self, vs_currency: &str) -> Self {
        self.vs_currency = vs_currency.to_lowercase();
        self
    }

    /// `{base}/coins/{asset}/market_chart`, with the asset encoded as a
    /// single path segment.
    fn chart_url(&self, asset: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("coins")
            .push(&asset.to_lowercase())
            .push("market_chart");
        Ok(url)
    }

    async fn request(&self, asset: &str, timeframe: Timeframe) -> Result<Vec<PriceSample>, FetchError> {
        let url = self.chart_url(asset)?;
        let days = timeframe.days().to_string();

        let response = self
            .client
            .get(url.clone())
            .query(&[("vs_currency", self.vs_currency.as_str()), ("days", days.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let chart: MarketChartResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::InvalidPayload(format!("market_chart for {}: {}", asset, e)))?;

        Ok(chart.into_samples())
    }
}

#[async_trait]
impl PriceHistoryProvider for HttpPriceHistoryProvider {
    async fn fetch_price_history(
        &self,
        asset: &str,
        timeframe: Timeframe,
        cancel: CancellationToken,
    ) -> Result<Vec<PriceSample>, FetchError> {
        let samples = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchError::Aborted),
            result = self.request(asset, timeframe) => result?,
        };

        debug!(
            asset = %asset,
            timeframe = %timeframe,
            samples = samples.len(),
            "Fetched price history"
        );
        Ok(samples)
    }
}
