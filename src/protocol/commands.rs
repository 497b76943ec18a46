//! Module `commands`
//!
//! Defines the four protocol verbs, the `Command` type sent to the server,
//! and its wire encoding.

use std::fmt;

use crate::error::SessionError;
use crate::utils::validation::validate_argument;

/// One of the protocol command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    List,
    Size,
    Get,
    Quit,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::List => "LIST",
            Verb::Size => "SIZE",
            Verb::Get => "GET",
            Verb::Quit => "QUIT",
        }
    }

    /// Whether the verb carries a filename argument.
    pub fn takes_argument(&self) -> bool {
        matches!(self, Verb::Size | Verb::Get)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to the server.
///
/// `SIZE` and `GET` carry a filename; `LIST` and `QUIT` carry nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Size(String),
    Get(String),
    Quit,
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Command::List => Verb::List,
            Command::Size(_) => Verb::Size,
            Command::Get(_) => Verb::Get,
            Command::Quit => Verb::Quit,
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Command::Size(name) | Command::Get(name) => Some(name),
            Command::List | Command::Quit => None,
        }
    }

    /// Checks that the argument fits on a single wire line.
    pub fn validate(&self, max_name_length: usize) -> Result<(), SessionError> {
        match self.argument() {
            Some(name) => validate_argument(name, max_name_length),
            None => Ok(()),
        }
    }

    /// Encodes the command as a single newline-terminated line.
    pub fn to_wire(&self) -> String {
        match self.argument() {
            Some(arg) => format!("{} {}\n", self.verb(), arg),
            None => format!("{}\n", self.verb()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument() {
            Some(arg) => write!(f, "{} {}", self.verb(), arg),
            None => write!(f, "{}", self.verb()),
        }
    }
}
