//! Raw price momentum

/// Momentum = price - price[n - period]
pub fn calculate_momentum(prices: &[f64], period: u32) -> Option<f64> {
    let period = period as usize;
    if period == 0 || prices.len() < period + 1 {
        return None;
    }
    Some(prices[prices.len() - 1] - prices[prices.len() - 1 - period])
}
