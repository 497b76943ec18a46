//! Error handlers
//!
//! Logs session errors at a level matching their category.

use crate::error::types::{ErrorCategory, SessionError};
use log::{error, warn};

/// Log a session error
pub fn report_error(err: &SessionError) {
    match err.category() {
        ErrorCategory::Transport => error!("Session terminated: {}", err),
        ErrorCategory::Sink => error!("Transfer aborted: {}", err),
        ErrorCategory::Protocol | ErrorCategory::Usage => warn!("{}", err),
    }
}
