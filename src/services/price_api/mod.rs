//! Market-chart HTTP API client.

pub mod messages;
pub mod provider;

pub use provider::HttpPriceHistoryProvider;
