//! List operation
//!
//! `LIST` is answered by a status line and, on `+OK`, any number of entry
//! lines closed by a line holding exactly `.`.

use log::debug;
use std::io::{Read, Write};

use crate::error::SessionError;
use crate::protocol::{Command, ProtocolStream, Response};
use crate::session::Session;

/// Line that ends a listing.
pub const TERMINATOR: &str = ".";

/// Sends `LIST` and reads its status line.
///
/// On `-ERR` nothing further is read; the server sends no entries after an error.
pub fn request<S: Read + Write>(stream: &mut ProtocolStream<S>) -> Result<(), SessionError> {
    stream.send(&Command::List)?;
    match Response::parse(&stream.read_line()?) {
        Response::Ok(_) => Ok(()),
        Response::Err(msg) => Err(SessionError::ListFailed(msg)),
    }
}

/// Reads the next entry, or `None` once the terminator has been consumed.
pub fn next_entry<S: Read + Write>(
    stream: &mut ProtocolStream<S>,
) -> Result<Option<String>, SessionError> {
    let line = stream.read_line()?;
    if line == TERMINATOR {
        debug!("End of listing");
        return Ok(None);
    }
    Ok(Some(line))
}

/// Lazy, single-pass sequence of listing entries.
///
/// Dropping it early reads the remaining entries so the next command starts
/// on a fresh response.
#[derive(Debug)]
pub struct ListEntries<'a, S: Read + Write> {
    session: &'a mut Session<S>,
    finished: bool,
}

impl<'a, S: Read + Write> ListEntries<'a, S> {
    pub(crate) fn new(session: &'a mut Session<S>) -> Self {
        Self {
            session,
            finished: false,
        }
    }
}

impl<S: Read + Write> Iterator for ListEntries<'_, S> {
    type Item = Result<String, SessionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.session.next_list_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: Read + Write> Drop for ListEntries<'_, S> {
    fn drop(&mut self) {
        while self.next().is_some() {}
    }
}
