//! Protocol session
//!
//! The session state machine and the list and get operations it drives.

pub mod core;
pub mod get;
pub mod list;
pub mod state;

pub use self::core::{Outcome, Request, Session, SessionOptions};
pub use list::ListEntries;
pub use state::SessionState;
