//! Race-free wrappers around asynchronous fetches.

pub mod coordinator;

pub use coordinator::*;
