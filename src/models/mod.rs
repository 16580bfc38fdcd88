//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod indicators;
pub mod price;
pub mod signal;

pub use analysis::AnalysisResult;
pub use indicators::{SupportResistanceIndicator, TechnicalIndicator};
pub use price::{PriceSample, Timeframe};
pub use signal::{SignalDirection, SignalReason};
