//! Wire protocol
//!
//! Command encoding, status line classification and the framed stream.

pub mod commands;
pub mod responses;
pub mod stream;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use commands::{Command, Verb};
pub use responses::Response;
pub use stream::ProtocolStream;
