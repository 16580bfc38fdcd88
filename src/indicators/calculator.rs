//! Turns a price sequence into the catalogue of [`TechnicalIndicator`]s.

use tracing::trace;

use crate::indicators::momentum::{calculate_macd, calculate_momentum, calculate_roc, calculate_rsi};
use crate::indicators::registry::{available_for, IndicatorKind, IndicatorSpec};
use crate::indicators::trend::{calculate_sma, ema_spread};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::TechnicalIndicator;
use crate::models::price::{finite_prices, PriceSample};
use crate::models::signal::SignalDirection;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// ROC moves smaller than this (in percent) are treated as noise.
pub const ROC_THRESHOLD_PCT: f64 = 0.5;

/// Compute every indicator whose lookback the series satisfies.
///
/// Non-finite prices are dropped first. Short or empty input yields fewer (or
/// no) indicators rather than an error.
pub fn compute_indicators(prices: &[f64]) -> Vec<TechnicalIndicator> {
    let prices: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
    let Some(&last) = prices.last() else {
        return Vec::new();
    };

    available_for(prices.len())
        .filter_map(|spec| {
            let indicator = evaluate(spec, &prices, last);
            if indicator.is_none() {
                trace!(indicator = spec.name, "Indicator skipped: degenerate input");
            }
            indicator
        })
        .collect()
}

/// Same as [`compute_indicators`] over a sample series.
pub fn compute_indicators_for_series(series: &[PriceSample]) -> Vec<TechnicalIndicator> {
    compute_indicators(&finite_prices(series))
}

fn evaluate(spec: &IndicatorSpec, prices: &[f64], last: f64) -> Option<TechnicalIndicator> {
    let (value, signal) = match spec.kind {
        IndicatorKind::Momentum3 => {
            let momentum = calculate_momentum(prices, 3)?;
            (momentum, by_sign(momentum))
        }
        IndicatorKind::Sma5 => {
            let sma = calculate_sma(prices, 5)?;
            (sma.value, by_sign(last - sma.value))
        }
        IndicatorKind::Roc10 => {
            let roc = calculate_roc(prices, 10)?;
            let signal = if roc > ROC_THRESHOLD_PCT {
                SignalDirection::Buy
            } else if roc < -ROC_THRESHOLD_PCT {
                SignalDirection::Sell
            } else {
                SignalDirection::Neutral
            };
            (roc, signal)
        }
        IndicatorKind::Rsi14 => {
            let rsi = calculate_rsi(prices, 14)?;
            let signal = if rsi.value < RSI_OVERSOLD {
                SignalDirection::Buy
            } else if rsi.value > RSI_OVERBOUGHT {
                SignalDirection::Sell
            } else {
                SignalDirection::Neutral
            };
            (rsi.value, signal)
        }
        IndicatorKind::Sma20 => {
            let sma = calculate_sma(prices, 20)?;
            (sma.value, by_sign(last - sma.value))
        }
        IndicatorKind::Bollinger20 => {
            let bands = calculate_bollinger_bands(prices, 20, 2.0)?;
            let width = bands.upper - bands.lower;
            // %B: 0 at the lower band, 1 at the upper band.
            let percent_b = if width > 0.0 {
                (last - bands.lower) / width
            } else {
                0.5
            };
            let signal = if last < bands.lower {
                SignalDirection::Buy
            } else if last > bands.upper {
                SignalDirection::Sell
            } else {
                SignalDirection::Neutral
            };
            (percent_b, signal)
        }
        IndicatorKind::EmaCross12x26 => {
            let spread = ema_spread(prices, 12, 26)?;
            (spread, by_sign(spread))
        }
        IndicatorKind::Macd12x26x9 => {
            let macd = calculate_macd(prices, 12, 26, 9)?;
            (macd.histogram, by_sign(macd.histogram))
        }
    };

    if !value.is_finite() {
        return None;
    }

    Some(TechnicalIndicator::new(spec.name, value, signal, spec.weight))
}

fn by_sign(value: f64) -> SignalDirection {
    if value > 0.0 {
        SignalDirection::Buy
    } else if value < 0.0 {
        SignalDirection::Sell
    } else {
        SignalDirection::Neutral
    }
}
