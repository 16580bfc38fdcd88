//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::MovingAverageIndicator;

/// Calculate EMA for a specific period
pub fn calculate_ema(prices: &[f64], period: u32) -> Option<MovingAverageIndicator> {
    let value = math::ema(prices, period as usize)?;
    Some(MovingAverageIndicator { value, period })
}

/// Fast EMA minus slow EMA.
///
/// Positive when the fast average is above the slow one.
pub fn ema_spread(prices: &[f64], fast_period: u32, slow_period: u32) -> Option<f64> {
    let fast_ema = calculate_ema(prices, fast_period)?;
    let slow_ema = calculate_ema(prices, slow_period)?;
    Some(fast_ema.value - slow_ema.value)
}
