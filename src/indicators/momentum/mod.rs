//! Momentum indicators: RSI, MACD, ROC, raw momentum

pub mod macd;
pub mod momentum;
pub mod roc;
pub mod rsi;

pub use macd::*;
pub use momentum::*;
pub use roc::*;
pub use rsi::*;
