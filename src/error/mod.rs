//! Error handling
//!
//! Defines error types and handling for the client.

pub mod handlers;
pub mod types;

pub use handlers::report_error;
pub use types::*;
