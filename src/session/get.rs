//! Get operation
//!
//! `SIZE <name>` fixes the declared length, `GET <name>` starts the payload,
//! and the payload is copied chunk by chunk into a sink opened only after
//! both replies were `+OK`.

use log::{error, info};
use std::io::{self, Read, Write};

use crate::error::SessionError;
use crate::protocol::{Command, ProtocolStream, Response};
use crate::session::SessionOptions;
use crate::transfer::{
    TransferMode, TransferOutcome, TransferRequest, discard_payload, receive_payload,
};

/// Sends `SIZE <filename>` and returns the declared byte count.
pub fn request_size<S: Read + Write>(
    stream: &mut ProtocolStream<S>,
    filename: &str,
    options: &SessionOptions,
) -> Result<u64, SessionError> {
    let command = Command::Size(filename.to_string());
    command.validate(options.max_name_length)?;
    stream.send(&command)?;

    match Response::parse(&stream.read_line()?) {
        Response::Ok(payload) => payload
            .trim()
            .parse::<u64>()
            .map_err(|_| SessionError::InvalidSize(payload)),
        Response::Err(msg) => Err(SessionError::SizeFailed(msg)),
    }
}

/// Downloads `filename` into the sink produced by `open_sink`.
///
/// A `-ERR` to either `SIZE` or `GET` returns before `open_sink` is called.
/// A server that closes early yields an incomplete [`TransferOutcome`], not an
/// error. The sink is dropped before this returns.
pub fn fetch<S, W, F>(
    stream: &mut ProtocolStream<S>,
    filename: &str,
    mode: TransferMode,
    options: &SessionOptions,
    open_sink: F,
) -> Result<TransferOutcome, SessionError>
where
    S: Read + Write,
    W: Write,
    F: FnOnce() -> io::Result<W>,
{
    let declared_size = request_size(stream, filename, options)?;

    stream.send(&Command::Get(filename.to_string()))?;
    if let Response::Err(msg) = Response::parse(&stream.read_line()?) {
        return Err(SessionError::GetFailed(msg));
    }

    let request = TransferRequest {
        filename: filename.to_string(),
        declared_size,
        mode,
    };
    info!(
        "Receiving {} ({} bytes, {:?})",
        request.filename, request.declared_size, request.mode
    );

    let mut sink = match open_sink() {
        Ok(sink) => sink,
        Err(e) => {
            error!("Cannot open output for {filename}: {e}");
            discard_payload(stream, declared_size, options.chunk_size)?;
            return Err(SessionError::Sink {
                source: e,
                bytes_written: 0,
            });
        }
    };

    let outcome = receive_payload(stream, &mut sink, &request, options.chunk_size);
    drop(sink);
    outcome
}
