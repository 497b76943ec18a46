//! Terminal module
//!
//! This module handles all menu display and user interaction.

pub mod listing;
pub mod prompt;
pub mod session;

pub use session::Terminal;
