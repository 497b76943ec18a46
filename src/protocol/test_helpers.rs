//! Test helpers for code dealing with the wire protocol

use std::io::{self, Cursor, Read, Write};

/// In-memory duplex stream: reads come from a canned server script,
/// writes are captured for inspection.
#[derive(Debug)]
pub(crate) struct MockStream {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
    max_read: usize,
    fail_writes: bool,
}

impl MockStream {
    pub(crate) fn new(input: &[u8]) -> Self {
        Self {
            input: Cursor::new(input.to_vec()),
            output: Vec::new(),
            max_read: usize::MAX,
            fail_writes: false,
        }
    }

    /// Caps each `read` call, to exercise reassembly across short reads.
    pub(crate) fn with_max_read(mut self, max_read: usize) -> Self {
        self.max_read = max_read;
        self
    }

    pub(crate) fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub(crate) fn written(&self) -> &[u8] {
        &self.output
    }

    /// Bytes of the server script not yet consumed.
    pub(crate) fn unread(&self) -> usize {
        self.input.get_ref().len() - self.input.position() as usize
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.max_read);
        self.input.read(&mut buf[..len])
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
