//! Transfer result types
//!
//! Defines the request and outcome records of a download.

use crate::transfer::modes::TransferMode;

/// A download about to start. `declared_size` comes from `SIZE` and is untrusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub filename: String,
    pub declared_size: u64,
    pub mode: TransferMode,
}

/// Result of a download.
///
/// `complete` is the only authority on success: it holds exactly when the
/// number of bytes received equals the declared size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOutcome {
    pub declared_size: u64,
    pub bytes_received: u64,
    pub complete: bool,
}

impl TransferOutcome {
    pub fn new(declared_size: u64, bytes_received: u64) -> Self {
        Self {
            declared_size,
            bytes_received,
            complete: bytes_received == declared_size,
        }
    }

    /// Bytes declared but never received.
    pub fn shortfall(&self) -> u64 {
        self.declared_size.saturating_sub(self.bytes_received)
    }
}
