//! Session lifecycle states

use std::fmt;

/// `Connected -> Ready -> {Listing | Downloading} -> Ready -> Closed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Greeting read, no command issued yet.
    Connected,
    Ready,
    Listing,
    Downloading,
    Closed,
}

impl SessionState {
    /// Whether a new command may be issued.
    pub fn accepts_commands(&self) -> bool {
        matches!(self, SessionState::Connected | SessionState::Ready)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connected => "connected",
            SessionState::Ready => "ready",
            SessionState::Listing => "listing",
            SessionState::Downloading => "downloading",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}
