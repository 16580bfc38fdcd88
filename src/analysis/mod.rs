//! Technical analysis facade and per-subscription analysis sessions.

pub mod facade;
pub mod session;

pub use facade::*;
pub use session::*;
