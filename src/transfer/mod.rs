//! Transfer module
//!
//! Output destinations, transfer records, and the chunked payload copy.

pub mod file_ops;
pub mod modes;
pub mod results;

pub use file_ops::{DEFAULT_CHUNK_SIZE, discard_payload, receive_payload};
pub use modes::{Destination, TransferMode};
pub use results::{TransferOutcome, TransferRequest};
