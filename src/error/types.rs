//! Error types
//!
//! Defines the session error taxonomy and the top-level client error.

use std::fmt;
use std::io;

/// Broad classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Read/write failure or broken framing on the connection. Ends the session.
    Transport,
    /// A well-formed `-ERR` (or unusable `+OK`) reply from the server.
    Protocol,
    /// The output destination could not be opened or written.
    Sink,
    /// The request was rejected locally; nothing was sent.
    Usage,
}

/// Errors produced by the protocol core.
#[derive(Debug)]
pub enum SessionError {
    Transport(io::Error),
    ConnectionClosed,
    LineTooLong(usize),
    SizeFailed(String),
    GetFailed(String),
    ListFailed(String),
    InvalidSize(String),
    Sink {
        source: io::Error,
        bytes_written: u64,
    },
    InvalidArgument(String),
    NameTooLong {
        length: usize,
        limit: usize,
    },
    Closed,
}

impl SessionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::Transport(_)
            | SessionError::ConnectionClosed
            | SessionError::LineTooLong(_)
            | SessionError::Closed => ErrorCategory::Transport,
            SessionError::SizeFailed(_)
            | SessionError::GetFailed(_)
            | SessionError::ListFailed(_)
            | SessionError::InvalidSize(_) => ErrorCategory::Protocol,
            SessionError::Sink { .. } => ErrorCategory::Sink,
            SessionError::InvalidArgument(_) | SessionError::NameTooLong { .. } => {
                ErrorCategory::Usage
            }
        }
    }

    /// Whether this error leaves the connection unusable.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Transport(e) => write!(f, "Connection error: {}", e),
            SessionError::ConnectionClosed => write!(f, "Connection closed by server"),
            SessionError::LineTooLong(limit) => {
                write!(f, "Server line exceeds {} bytes", limit)
            }
            SessionError::SizeFailed(msg) => write!(f, "SIZE failed: {}", msg),
            SessionError::GetFailed(msg) => write!(f, "GET failed: {}", msg),
            SessionError::ListFailed(msg) => write!(f, "LIST failed: {}", msg),
            SessionError::InvalidSize(payload) => {
                write!(f, "Server sent an invalid size: {:?}", payload)
            }
            SessionError::Sink {
                source,
                bytes_written,
            } => write!(
                f,
                "Output error after {} bytes written: {}",
                bytes_written, source
            ),
            SessionError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            SessionError::NameTooLong { length, limit } => {
                write!(f, "Name is {} bytes long (limit {})", length, limit)
            }
            SessionError::Closed => write!(f, "Session is closed"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Transport(e) => Some(e),
            SessionError::Sink { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(error: io::Error) -> Self {
        SessionError::Transport(error)
    }
}

/// Top-level error for the interactive client
#[derive(Debug)]
pub enum ClientError {
    Config(config::ConfigError),
    Connect {
        host: String,
        port: u16,
        source: io::Error,
    },
    Terminal(io::Error),
    Session(SessionError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(e) => write!(f, "Configuration error: {}", e),
            ClientError::Connect { host, port, source } => {
                write!(f, "Cannot connect to {}:{}: {}", host, port, source)
            }
            ClientError::Terminal(e) => write!(f, "Terminal I/O error: {}", e),
            ClientError::Session(e) => write!(f, "Session error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<config::ConfigError> for ClientError {
    fn from(error: config::ConfigError) -> Self {
        ClientError::Config(error)
    }
}

impl From<SessionError> for ClientError {
    fn from(error: SessionError) -> Self {
        ClientError::Session(error)
    }
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        ClientError::Terminal(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_fatal() {
        assert!(SessionError::ConnectionClosed.is_fatal());
        assert!(SessionError::LineTooLong(10).is_fatal());
        assert!(SessionError::Transport(io::Error::other("reset")).is_fatal());
    }

    #[test]
    fn test_protocol_and_sink_errors_are_recoverable() {
        assert!(!SessionError::SizeFailed("-ERR nope".into()).is_fatal());
        assert!(!SessionError::GetFailed("-ERR nope".into()).is_fatal());
        assert!(!SessionError::ListFailed("-ERR nope".into()).is_fatal());
        let sink = SessionError::Sink {
            source: io::Error::other("disk full"),
            bytes_written: 12,
        };
        assert_eq!(sink.category(), ErrorCategory::Sink);
        assert!(!sink.is_fatal());
    }

    #[test]
    fn test_display_carries_server_message() {
        let err = SessionError::ListFailed("-ERR no such directory".into());
        assert_eq!(err.to_string(), "LIST failed: -ERR no such directory");
    }
}
