//! Client for a minimal line-oriented file transfer protocol.
//!
//! A server greets the client and then answers `LIST`, `SIZE <name>`,
//! `GET <name>` and `QUIT`. Replies are text lines, except that a successful
//! `GET` is followed by exactly the byte count announced by `SIZE`.

pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod terminal;
pub mod transfer;
pub mod utils;

pub use crate::config::ClientConfig;
pub use error::{ClientError, SessionError};
pub use session::{Session, SessionOptions};
