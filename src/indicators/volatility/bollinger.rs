//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerBandsIndicator;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
pub fn calculate_bollinger_bands(
    prices: &[f64],
    period: u32,
    std_dev: f64,
) -> Option<BollingerBandsIndicator> {
    let middle = math::sma(prices, period as usize)?;
    let std = math::standard_deviation(prices, period as usize)?;

    Some(BollingerBandsIndicator {
        upper: middle + (std_dev * std),
        middle,
        lower: middle - (std_dev * std),
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(prices: &[f64]) -> Option<BollingerBandsIndicator> {
    calculate_bollinger_bands(prices, 20, 2.0)
}
