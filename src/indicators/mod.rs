pub mod calculator;
pub mod registry;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use calculator::*;
pub use registry::*;
