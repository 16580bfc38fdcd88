//! Rate of Change, in percent

/// ROC = (price - price[n - period]) / price[n - period] * 100
pub fn calculate_roc(prices: &[f64], period: u32) -> Option<f64> {
    let period = period as usize;
    if period == 0 || prices.len() < period + 1 {
        return None;
    }
    let current = prices[prices.len() - 1];
    let base = prices[prices.len() - 1 - period];
    if base == 0.0 {
        return None;
    }
    Some((current - base) / base * 100.0)
}
