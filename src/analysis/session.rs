//! One UI-style subscription: fetch a price series race-free, then analyze it.

use std::sync::Arc;

use crate::analysis::facade::TechnicalAnalyzer;
use crate::error::FetchError;
use crate::fetch::{FetchState, FetchSubscription};
use crate::models::analysis::AnalysisResult;
use crate::models::price::{PriceSample, Timeframe};
use crate::services::market_data::PriceHistoryProvider;

pub struct AnalysisSession<P: ?Sized> {
    provider: Arc<P>,
    analyzer: TechnicalAnalyzer,
    prices: FetchSubscription<Arc<Vec<PriceSample>>>,
}

impl<P> AnalysisSession<P>
where
    P: PriceHistoryProvider + ?Sized + 'static,
{
    pub fn new(provider: Arc<P>, analyzer: TechnicalAnalyzer) -> Self {
        Self {
            provider,
            analyzer,
            prices: FetchSubscription::new("price-history"),
        }
    }

    /// Fetch `asset`'s history and analyze it.
    ///
    /// Starting a refresh supersedes any refresh still in flight. `Ok(None)`
    /// means the fetch was cancelled or superseded, or no data came back.
    pub async fn refresh(
        &self,
        asset: &str,
        timeframe: Timeframe,
    ) -> Result<Option<Arc<AnalysisResult>>, FetchError> {
        let provider = self.provider.clone();
        let asset = asset.to_string();

        let series = self
            .prices
            .run(move |cancel| async move {
                provider
                    .fetch_price_history(&asset, timeframe, cancel)
                    .await
                    .map(Arc::new)
            })
            .await?;

        Ok(series.and_then(|series| self.analyzer.analyze(&series)))
    }

    /// Analysis of the most recently applied series, if any.
    pub fn current(&self) -> Option<Arc<AnalysisResult>> {
        self.prices
            .latest()
            .and_then(|series| self.analyzer.analyze(&series))
    }

    /// The most recently applied price series, if any.
    pub fn series(&self) -> Option<Arc<Vec<PriceSample>>> {
        self.prices.latest()
    }

    pub fn state(&self) -> FetchState {
        self.prices.state()
    }

    pub fn analyzer(&self) -> &TechnicalAnalyzer {
        &self.analyzer
    }

    /// Tear down: cancel any in-flight fetch and ignore late results.
    pub fn unmount(&self) {
        self.prices.unmount();
    }
}
