//! Signal aggregation interfaces.

pub mod aggregation;
pub mod scoring;

pub use aggregation::*;
pub use scoring::*;
