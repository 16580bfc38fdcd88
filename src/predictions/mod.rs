//! Prediction generation and the cache-first prediction service.

pub mod generator;
pub mod service;

pub use generator::*;
pub use service::*;
