//! RSI (Relative Strength Index) indicator

use crate::models::indicators::RsiIndicator;

/// Calculate RSI over the last `period` price changes
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
pub fn calculate_rsi(prices: &[f64], period: u32) -> Option<RsiIndicator> {
    let period_len = period as usize;
    if period == 0 || prices.len() < period_len + 1 {
        return None;
    }

    let window = &prices[prices.len() - (period_len + 1)..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    let value = if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    Some(RsiIndicator { value, period })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(prices: &[f64]) -> Option<RsiIndicator> {
    calculate_rsi(prices, 14)
}
