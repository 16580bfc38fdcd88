//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::indicators::MovingAverageIndicator;

pub fn calculate_sma(prices: &[f64], period: u32) -> Option<MovingAverageIndicator> {
    let value = math::sma(prices, period as usize)?;
    Some(MovingAverageIndicator { value, period })
}
