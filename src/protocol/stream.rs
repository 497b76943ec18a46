//! Module `stream`
//!
//! A single buffered wrapper over the duplex connection. Line reads and
//! fixed-length reads both draw from the same `BufReader` backlog, so bytes
//! prefetched while scanning for a newline are handed to the next binary read
//! instead of being lost. Commands are written straight to the inner stream.

use log::debug;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};

use crate::error::SessionError;
use crate::protocol::Command;

const READ_BUFFER_SIZE: usize = 8192;

/// Framed access to one server connection.
#[derive(Debug)]
pub struct ProtocolStream<S: Read + Write> {
    reader: BufReader<S>,
    max_line_length: usize,
}

impl<S: Read + Write> ProtocolStream<S> {
    pub fn new(stream: S, max_line_length: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, stream),
            max_line_length,
        }
    }

    /// Reads one line, without its `\n` (or `\r\n`) terminator.
    ///
    /// Fails with `ConnectionClosed` if the source ends before a terminator and
    /// with `LineTooLong` once the content exceeds the configured limit.
    pub fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = Vec::new();

        loop {
            let (found, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(SessionError::Transport(e)),
                };
                if available.is_empty() {
                    return Err(SessionError::ConnectionClosed);
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(i) => {
                        line.extend_from_slice(&available[..i]);
                        (true, i + 1)
                    }
                    None => {
                        line.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };
            self.reader.consume(used);

            if line.len() > self.max_line_length.saturating_add(1) {
                return Err(SessionError::LineTooLong(self.max_line_length));
            }
            if found {
                break;
            }
        }

        if line.last() == Some(&b'\r') {
            let _ = line.pop();
        }
        if line.len() > self.max_line_length {
            return Err(SessionError::LineTooLong(self.max_line_length));
        }

        let line = String::from_utf8_lossy(&line).into_owned();
        debug!("<- {line}");
        Ok(line)
    }

    /// Fills `buf` from the backlog, then from the source.
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` only
    /// when the source is exhausted.
    pub fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> Result<usize, SessionError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(SessionError::Transport(e)),
            }
        }
        Ok(filled)
    }

    /// Writes `command` and flushes immediately.
    pub fn send(&mut self, command: &Command) -> Result<(), SessionError> {
        debug!("-> {command}");
        let stream = self.reader.get_mut();
        stream.write_all(command.to_wire().as_bytes())?;
        stream.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }
}
