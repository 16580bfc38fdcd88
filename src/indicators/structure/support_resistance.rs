//! Support and Resistance levels detection

use crate::config::DEFAULT_SUPPORT_RESISTANCE_LOOKBACK;
use crate::models::indicators::SupportResistanceIndicator;

/// Calculate support and resistance levels
///
/// Support is the lowest and resistance the highest finite price within the
/// trailing `lookback` window. A window shorter than `lookback` uses whatever
/// is available, so a single price yields a degenerate band at that price.
pub fn calculate_support_resistance(
    prices: &[f64],
    lookback: usize,
) -> Option<SupportResistanceIndicator> {
    let finite: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
    let current_price = *finite.last()?;

    let lookback = lookback.max(1);
    let window = &finite[finite.len().saturating_sub(lookback)..];

    let (support_level, resistance_level) = window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });

    let (support_distance_pct, resistance_distance_pct) = if current_price == 0.0 {
        (0.0, 0.0)
    } else {
        (
            ((current_price - support_level) / current_price) * 100.0,
            ((resistance_level - current_price) / current_price) * 100.0,
        )
    };

    Some(SupportResistanceIndicator {
        support_level,
        resistance_level,
        support_distance_pct,
        resistance_distance_pct,
    })
}

/// Calculate support/resistance with default lookback (20)
pub fn calculate_support_resistance_default(prices: &[f64]) -> Option<SupportResistanceIndicator> {
    calculate_support_resistance(prices, DEFAULT_SUPPORT_RESISTANCE_LOOKBACK)
}
