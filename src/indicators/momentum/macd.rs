//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::indicators::MacdIndicator;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
pub fn calculate_macd(
    prices: &[f64],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    if fast_period == 0 || fast_period >= slow_period {
        return None;
    }
    if prices.len() < slow_period as usize + signal_period as usize {
        return None;
    }

    let fast = math::ema_series(prices, fast_period as usize)?;
    let slow = math::ema_series(prices, slow_period as usize)?;

    // Align both series on the same trailing price index.
    let offset = (slow_period - fast_period) as usize;
    let macd_values: Vec<f64> = slow
        .iter()
        .zip(&fast[offset..])
        .map(|(slow, fast)| fast - slow)
        .collect();

    let macd_line = *macd_values.last()?;
    let signal_line = math::ema(&macd_values, signal_period as usize)?;

    Some(MacdIndicator {
        macd: macd_line,
        signal: signal_line,
        histogram: macd_line - signal_line,
        period: (fast_period, slow_period, signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(prices: &[f64]) -> Option<MacdIndicator> {
    calculate_macd(prices, 12, 26, 9)
}
