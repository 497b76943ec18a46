//! Session core
//!
//! Owns the connection for its whole life, runs one command at a time, and
//! releases the connection exactly once: on `QUIT`, on the first fatal
//! error, or when dropped.

use log::{debug, info, warn};
use std::io::{Read, Write};

use crate::error::SessionError;
use crate::protocol::{Command, ProtocolStream};
use crate::session::get;
use crate::session::list::{self, ListEntries};
use crate::session::state::SessionState;
use crate::transfer::{DEFAULT_CHUNK_SIZE, Destination, TransferOutcome};

/// Limits applied to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Bytes requested per payload read
    pub chunk_size: usize,
    /// Longest accepted server line, terminator excluded
    pub max_line_length: usize,
    /// Longest accepted filename argument
    pub max_name_length: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_length: 4096,
            max_name_length: 255,
        }
    }
}

/// A single command for [`Session::dispatch`].
#[derive(Debug)]
pub enum Request<'a> {
    List,
    Size(String),
    Get {
        filename: String,
        destination: Destination<'a>,
    },
    Quit,
}

/// What a dispatched request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(Vec<String>),
    Sized(u64),
    Transferred(TransferOutcome),
    Closed,
}

/// A protocol session over one connection.
#[derive(Debug)]
pub struct Session<S: Read + Write> {
    stream: Option<ProtocolStream<S>>,
    state: SessionState,
    greeting: String,
    options: SessionOptions,
}

impl<S: Read + Write> Session<S> {
    /// Takes ownership of a connected stream and reads the server greeting.
    ///
    /// The greeting is kept verbatim and never parsed as a status line.
    pub fn new(stream: S, options: SessionOptions) -> Result<Self, SessionError> {
        let mut stream = ProtocolStream::new(stream, options.max_line_length);
        let greeting = stream.read_line()?;
        info!("Server greeting: {greeting}");

        Ok(Self {
            stream: Some(stream),
            state: SessionState::Connected,
            greeting,
            options,
        })
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Starts a listing and returns its entries as a lazy sequence.
    ///
    /// A `-ERR` reply is returned here and no entries are read.
    pub fn list(&mut self) -> Result<ListEntries<'_, S>, SessionError> {
        let stream = self.begin(SessionState::Listing)?;
        let result = list::request(stream);
        match self.finish(result) {
            Ok(()) => Ok(ListEntries::new(self)),
            Err(e) => Err(e),
        }
    }

    /// Runs a listing to completion and collects the entries.
    pub fn list_all(&mut self) -> Result<Vec<String>, SessionError> {
        self.list()?.collect()
    }

    /// Reads one listing entry; called by [`ListEntries`].
    pub(crate) fn next_list_entry(&mut self) -> Result<Option<String>, SessionError> {
        if self.state != SessionState::Listing {
            return Err(SessionError::Closed);
        }
        let stream = self.stream_mut()?;
        let result = list::next_entry(stream);
        let result = self.guard(result);
        if let Ok(None) = result {
            self.state = SessionState::Ready;
        }
        result
    }

    /// Asks the server for the size of `filename`.
    pub fn size(&mut self, filename: &str) -> Result<u64, SessionError> {
        let options = self.options;
        let stream = self.begin(SessionState::Ready)?;
        let result = get::request_size(stream, filename, &options);
        self.finish(result)
    }

    /// Downloads `filename` into `destination`.
    ///
    /// An incomplete transfer is not an error: check [`TransferOutcome::complete`].
    pub fn get(
        &mut self,
        filename: &str,
        destination: Destination<'_>,
    ) -> Result<TransferOutcome, SessionError> {
        let options = self.options;
        let mode = destination.mode();
        let stream = self.begin(SessionState::Downloading)?;
        let result = get::fetch(stream, filename, mode, &options, move || destination.open());
        let outcome = self.finish(result)?;
        if !outcome.complete {
            warn!(
                "{filename}: received {} of {} bytes",
                outcome.bytes_received, outcome.declared_size
            );
        }
        Ok(outcome)
    }

    /// Sends `QUIT` and closes the connection. No reply is awaited.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        let stream = self.stream_mut()?;
        let result = stream.send(&Command::Quit);
        self.close();
        result
    }

    /// Runs one request to completion.
    pub fn dispatch(&mut self, request: Request<'_>) -> Result<Outcome, SessionError> {
        match request {
            Request::List => self.list_all().map(Outcome::Listed),
            Request::Size(filename) => self.size(&filename).map(Outcome::Sized),
            Request::Get {
                filename,
                destination,
            } => self.get(&filename, destination).map(Outcome::Transferred),
            Request::Quit => self.quit().map(|()| Outcome::Closed),
        }
    }

    /// Releases the connection. Later calls do nothing.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            debug!("Releasing connection");
            drop(stream);
        }
        self.state = SessionState::Closed;
    }

    fn stream_mut(&mut self) -> Result<&mut ProtocolStream<S>, SessionError> {
        self.stream.as_mut().ok_or(SessionError::Closed)
    }

    /// Enters `next` if a command may start now, handing back the stream.
    fn begin(&mut self, next: SessionState) -> Result<&mut ProtocolStream<S>, SessionError> {
        if !self.state.accepts_commands() {
            return Err(SessionError::Closed);
        }
        self.state = next;
        self.stream_mut()
    }

    /// Closes on fatal errors and leaves other states alone.
    fn guard<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        if let Err(e) = &result {
            if e.is_fatal() {
                warn!("Closing session after fatal error: {e}");
                self.close();
            }
        }
        result
    }

    /// Returns to `Ready`, or `Closed` on a fatal error.
    fn finish<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        let result = self.guard(result);
        if !self.is_closed() && (result.is_err() || self.state != SessionState::Listing) {
            self.state = SessionState::Ready;
        }
        result
    }
}

impl<S: Read + Write> Drop for Session<S> {
    fn drop(&mut self) {
        self.close();
    }
}
