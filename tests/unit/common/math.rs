//! Unit tests for math helpers

use tokenlens::common::math::{ema, ema_series, sma, standard_deviation};

#[test]
fn sma_uses_trailing_window() {
    assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
    assert_eq!(sma(&[1.0], 2), None);
    assert_eq!(sma(&[1.0], 0), None);
}

#[test]
fn ema_of_constant_series_is_constant() {
    let values = vec![10.0; 30];
    let value = ema(&values, 12).unwrap();
    assert!((value - 10.0).abs() < 1e-12);
}

#[test]
fn ema_series_starts_at_first_full_window() {
    let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let series = ema_series(&values, 3).unwrap();
    assert_eq!(series.len(), 8);
    assert!((series[0] - 1.0).abs() < 1e-12);
}

#[test]
fn standard_deviation_of_known_window() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert!((standard_deviation(&values, 8).unwrap() - 2.0).abs() < 1e-12);
}
