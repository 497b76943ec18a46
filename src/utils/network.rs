//! Network utilities
//!
//! Opens the TCP connection a session runs over.

use log::{debug, info};
use std::io;
use std::net::{TcpStream, ToSocketAddrs};

/// Connect to `host:port`, trying every resolved address (IPv4 or IPv6) in order.
pub fn connect(host: &str, port: u16) -> io::Result<TcpStream> {
    let mut last_error = None;

    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                info!("Connected to {host} ({addr})");
                return Ok(stream);
            }
            Err(e) => {
                debug!("Connect to {addr} failed: {e}");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses found for {host}"),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_connect_to_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let stream = connect("127.0.0.1", port).unwrap();
        assert_eq!(stream.peer_addr().unwrap().port(), port);
    }

    #[test]
    fn test_connect_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        assert!(connect("127.0.0.1", port).is_err());
    }
}
