//! External data sources.

pub mod market_data;
pub mod price_api;

pub use market_data::{PriceHistoryProvider, StaticPriceHistoryProvider};
pub use price_api::HttpPriceHistoryProvider;
