//! Composes indicators, aggregation and support/resistance into one
//! [`AnalysisResult`], memoized on the content of the input series.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::{EngineConfig, DEFAULT_SUPPORT_RESISTANCE_LOOKBACK};
use crate::indicators::calculator::compute_indicators;
use crate::indicators::structure::calculate_support_resistance;
use crate::models::analysis::AnalysisResult;
use crate::models::price::{finite_prices, PriceSample};
use crate::signals::aggregation::SignalAggregator;

/// Number of top contributors kept in [`AnalysisResult::reasons`].
pub const REASON_LIMIT: usize = 3;

/// Analyze a series with default settings, without memoization.
///
/// Returns `None` when there is no data: an empty series, or one with no
/// finite price.
pub fn compute_analysis(series: &[PriceSample]) -> Option<AnalysisResult> {
    analyze_prices(
        &finite_prices(series),
        &SignalAggregator::default(),
        DEFAULT_SUPPORT_RESISTANCE_LOOKBACK,
    )
}

fn analyze_prices(
    prices: &[f64],
    aggregator: &SignalAggregator,
    lookback: usize,
) -> Option<AnalysisResult> {
    let bands = calculate_support_resistance(prices, lookback)?;
    let indicators = compute_indicators(prices);
    let aggregated = aggregator.aggregate(&indicators);
    let reasons = SignalAggregator::generate_reasons(&indicators, REASON_LIMIT);

    Some(AnalysisResult {
        indicators,
        overall_signal: aggregated.score,
        overall_trend: aggregated.trend,
        support_level: bands.support_level,
        resistance_level: bands.resistance_level,
        reasons,
    })
}

/// Identity of a series' content: timestamps, price bits and volume bits.
pub fn series_fingerprint(series: &[PriceSample]) -> u64 {
    let mut hasher = DefaultHasher::new();
    series.len().hash(&mut hasher);
    for sample in series {
        sample.timestamp.hash(&mut hasher);
        sample.price.to_bits().hash(&mut hasher);
        sample.volume.map(f64::to_bits).hash(&mut hasher);
    }
    hasher.finish()
}

struct Memo {
    fingerprint: u64,
    len: usize,
    result: Arc<AnalysisResult>,
}

/// Memoizing analysis facade.
///
/// Holds the last computed result and returns it, as the same `Arc`, for as
/// long as the input series content is unchanged.
pub struct TechnicalAnalyzer {
    aggregator: SignalAggregator,
    lookback: usize,
    memo: Mutex<Option<Memo>>,
    computations: AtomicU64,
}

impl Default for TechnicalAnalyzer {
    fn default() -> Self {
        Self::new(SignalAggregator::default(), DEFAULT_SUPPORT_RESISTANCE_LOOKBACK)
    }
}

impl TechnicalAnalyzer {
    pub fn new(aggregator: SignalAggregator, support_resistance_lookback: usize) -> Self {
        Self {
            aggregator,
            lookback: support_resistance_lookback.max(1),
            memo: Mutex::new(None),
            computations: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            SignalAggregator::new(config.signal_deadband),
            config.support_resistance_lookback,
        )
    }

    /// Analyze `series`, reusing the memoized result when its content has
    /// not changed since the previous call.
    pub fn analyze(&self, series: &[PriceSample]) -> Option<Arc<AnalysisResult>> {
        if series.is_empty() {
            return None;
        }

        let fingerprint = series_fingerprint(series);
        let mut memo = self.memo.lock();

        if let Some(cached) = memo.as_ref() {
            if cached.fingerprint == fingerprint && cached.len == series.len() {
                return Some(cached.result.clone());
            }
        }

        let result = Arc::new(analyze_prices(
            &finite_prices(series),
            &self.aggregator,
            self.lookback,
        )?);
        let count = self.computations.fetch_add(1, Ordering::Relaxed) + 1;

        debug!(
            samples = series.len(),
            indicators = result.indicators.len(),
            overall_signal = result.overall_signal,
            trend = ?result.overall_trend,
            computations = count,
            "Recomputed technical analysis"
        );

        *memo = Some(Memo {
            fingerprint,
            len: series.len(),
            result: result.clone(),
        });
        Some(result)
    }

    /// How many times the analysis has actually been recomputed.
    pub fn computation_count(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Drop the memoized result so the next call recomputes.
    pub fn invalidate(&self) {
        self.memo.lock().take();
    }
}
