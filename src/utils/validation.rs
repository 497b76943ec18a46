//! Input validation utilities
//!
//! Checks values that end up inside a single wire line.

use crate::error::SessionError;

/// Validate a command argument: non-empty, bounded, and free of control characters
pub fn validate_argument(arg: &str, max_length: usize) -> Result<(), SessionError> {
    if arg.trim().is_empty() {
        return Err(SessionError::InvalidArgument("name is empty".into()));
    }
    if arg.len() > max_length {
        return Err(SessionError::NameTooLong {
            length: arg.len(),
            limit: max_length,
        });
    }
    if let Some(c) = arg.chars().find(|c| c.is_control()) {
        return Err(SessionError::InvalidArgument(format!(
            "name contains control character {:?}",
            c
        )));
    }
    Ok(())
}
