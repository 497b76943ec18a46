//! Module `file_ops`
//!
//! Moves a declared-length binary payload from the connection into a sink,
//! one bounded chunk at a time. The payload is never held in memory as a
//! whole since the declared size is untrusted.

use log::{error, info, warn};
use std::io::{self, ErrorKind, Read, Write};

use crate::error::SessionError;
use crate::protocol::ProtocolStream;
use crate::transfer::results::{TransferOutcome, TransferRequest};

/// Default chunk size for payload reads
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Copies up to `request.declared_size` bytes from `stream` into `sink`.
///
/// Stops early, without error, if the server closes the connection; the
/// returned outcome is then incomplete. A sink failure discards the rest of
/// the payload so the connection stays framed, then reports the sink error.
pub fn receive_payload<S, W>(
    stream: &mut ProtocolStream<S>,
    sink: &mut W,
    request: &TransferRequest,
    chunk_size: usize,
) -> Result<TransferOutcome, SessionError>
where
    S: Read + Write,
    W: Write + ?Sized,
{
    let declared_size = request.declared_size;
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut received = 0u64;
    let mut written = 0u64;

    while received < declared_size {
        let want = chunk_len(declared_size - received, buffer.len());
        let n = stream.read_exact_or_eof(&mut buffer[..want])?;
        received += n as u64;

        if let Err(e) = write_chunk(sink, &buffer[..n], &mut written) {
            error!(
                "Failed to write {} after {written} bytes: {e}",
                request.filename
            );
            discard_payload(stream, declared_size - received, chunk_size)?;
            return Err(SessionError::Sink {
                source: e,
                bytes_written: written,
            });
        }

        if n < want {
            warn!(
                "Server closed the connection {} bytes short of {} ({} of {} received)",
                declared_size - received,
                request.filename,
                received,
                declared_size
            );
            break;
        }
    }

    if let Err(e) = sink.flush() {
        error!("Failed to flush {}: {e}", request.filename);
        return Err(SessionError::Sink {
            source: e,
            bytes_written: written,
        });
    }

    let outcome = TransferOutcome::new(declared_size, received);
    if outcome.complete {
        info!(
            "Transfer of {} complete ({} bytes)",
            request.filename, received
        );
    }
    Ok(outcome)
}

/// Reads and drops up to `remaining` payload bytes. Returns how many were seen.
pub fn discard_payload<S: Read + Write>(
    stream: &mut ProtocolStream<S>,
    remaining: u64,
    chunk_size: usize,
) -> Result<u64, SessionError> {
    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut discarded = 0u64;

    while discarded < remaining {
        let want = chunk_len(remaining - discarded, buffer.len());
        let n = stream.read_exact_or_eof(&mut buffer[..want])?;
        discarded += n as u64;
        if n < want {
            break;
        }
    }
    Ok(discarded)
}

/// Bytes to request next: the remainder, capped at the buffer size before narrowing.
fn chunk_len(remaining: u64, buffer_len: usize) -> usize {
    remaining.min(buffer_len as u64) as usize
}

/// Writes all of `data`, adding every byte the sink accepts to `written`,
/// including those accepted before a failure.
fn write_chunk<W: Write + ?Sized>(
    sink: &mut W,
    data: &[u8],
    written: &mut u64,
) -> io::Result<()> {
    let mut offset = 0;
    while offset < data.len() {
        match sink.write(&data[offset..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    ErrorKind::WriteZero,
                    "sink accepted no bytes",
                ));
            }
            Ok(k) => {
                offset += k;
                *written += k as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
