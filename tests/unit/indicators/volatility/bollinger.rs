//! Unit tests for Bollinger Bands

use tokenlens::indicators::volatility::{calculate_bollinger_bands, calculate_bollinger_bands_default};

#[test]
fn test_bollinger_insufficient_data() {
    assert!(calculate_bollinger_bands_default(&[1.0; 19]).is_none());
}

#[test]
fn test_bollinger_constant_series_collapses() {
    let bands = calculate_bollinger_bands_default(&[50.0; 25]).unwrap();
    assert_eq!(bands.upper, 50.0);
    assert_eq!(bands.middle, 50.0);
    assert_eq!(bands.lower, 50.0);
}

#[test]
fn test_bollinger_bands_are_symmetric() {
    let prices: Vec<f64> = (0..30).map(|i| 100.0 + ((i % 5) as f64)).collect();
    let bands = calculate_bollinger_bands(&prices, 20, 2.0).unwrap();
    assert!(bands.lower < bands.middle && bands.middle < bands.upper);
    assert!(((bands.upper - bands.middle) - (bands.middle - bands.lower)).abs() < 1e-9);
}
