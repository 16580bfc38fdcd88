//! Market structure: support and resistance bands

pub mod support_resistance;

pub use support_resistance::*;
