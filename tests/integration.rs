use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use lft_client::session::{Outcome, Request, SessionState};
use lft_client::transfer::Destination;
use lft_client::utils::network::connect;
use lft_client::{Session, SessionError, SessionOptions};

/// Name of a file the test server announces at 100 bytes but cuts off at 40.
const SHORT_FILE: &str = "short.bin";

fn binary_payload() -> Vec<u8> {
    let mut data: Vec<u8> = (0..=255u8).collect();
    data.extend_from_slice(b"\n.\n+OK\r\n");
    data.extend((0..3000u32).map(|i| (i % 251) as u8));
    data
}

fn files() -> HashMap<String, Vec<u8>> {
    let mut files = HashMap::new();
    files.insert("hello.txt".to_string(), b"Hello, world!\n".to_vec());
    files.insert("data.bin".to_string(), binary_payload());
    files.insert("empty".to_string(), Vec::new());
    files.insert(SHORT_FILE.to_string(), vec![b'x'; 100]);
    files
}

/// Serves one connection and returns every command line it received.
fn handle(stream: TcpStream) -> Vec<String> {
    let files = files();
    let mut writer = stream.try_clone().unwrap();
    let mut reader = BufReader::new(stream);
    let mut received = Vec::new();

    writer.write_all(b"Welcome to the test server\n").unwrap();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim_end().to_string();
        received.push(line.clone());

        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb.to_string(), arg.to_string()),
            None => (line.clone(), String::new()),
        };

        match (verb.as_str(), files.get(&arg)) {
            ("LIST", _) => {
                let mut names: Vec<&String> = files.keys().collect();
                names.sort();
                let mut reply = String::from("+OK\n");
                for name in names {
                    reply.push_str(name);
                    reply.push('\n');
                }
                reply.push_str(".\n");
                writer.write_all(reply.as_bytes()).unwrap();
            }
            ("SIZE", Some(data)) => {
                writer
                    .write_all(format!("+OK {}\n", data.len()).as_bytes())
                    .unwrap();
            }
            ("GET", Some(data)) if arg == SHORT_FILE => {
                writer.write_all(b"+OK\n").unwrap();
                writer.write_all(&data[..40]).unwrap();
                break;
            }
            ("GET", Some(data)) => {
                writer.write_all(b"+OK\n").unwrap();
                writer.write_all(data).unwrap();
            }
            ("SIZE", None) | ("GET", None) => {
                writer.write_all(b"-ERR no such file\n").unwrap();
            }
            ("QUIT", _) => break,
            _ => writer.write_all(b"-ERR unknown command\n").unwrap(),
        }
        writer.flush().unwrap();
    }
    received
}

fn start_server() -> (u16, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        handle(stream)
    });
    (port, handle)
}

fn open_session(port: u16) -> Session<TcpStream> {
    let stream = connect("127.0.0.1", port).unwrap();
    Session::new(stream, SessionOptions::default()).unwrap()
}

#[test]
fn test_full_session() {
    let (port, server) = start_server();
    let dir = tempfile::tempdir().unwrap();
    let mut session = open_session(port);
    assert_eq!(session.greeting(), "Welcome to the test server");

    let entries = session.list_all().unwrap();
    assert_eq!(entries, vec!["data.bin", "empty", "hello.txt", "short.bin"]);

    let mut shown = Vec::new();
    let outcome = session
        .get("hello.txt", Destination::View(&mut shown))
        .unwrap();
    assert!(outcome.complete);
    assert_eq!(shown, b"Hello, world!\n");

    let saved = dir.path().join("data.bin");
    let outcome = session
        .get("data.bin", Destination::Save(&saved))
        .unwrap();
    let expected = binary_payload();
    assert!(outcome.complete);
    assert_eq!(outcome.bytes_received, expected.len() as u64);
    assert_eq!(fs::read(&saved).unwrap(), expected);

    let empty = dir.path().join("empty");
    let outcome = session.get("empty", Destination::Save(&empty)).unwrap();
    assert!(outcome.complete);
    assert_eq!(fs::read(&empty).unwrap().len(), 0);

    assert_eq!(
        session.dispatch(Request::Quit).unwrap(),
        Outcome::Closed
    );
    assert_eq!(session.state(), SessionState::Closed);

    let received = server.join().unwrap();
    assert_eq!(
        received,
        vec![
            "LIST",
            "SIZE hello.txt",
            "GET hello.txt",
            "SIZE data.bin",
            "GET data.bin",
            "SIZE empty",
            "GET empty",
            "QUIT"
        ]
    );
}

#[test]
fn test_missing_file_never_sends_get() {
    let (port, server) = start_server();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing.txt");
    let mut session = open_session(port);

    let err = session
        .get("missing.txt", Destination::Save(&target))
        .unwrap_err();
    assert!(matches!(err, SessionError::SizeFailed(ref m) if m == "-ERR no such file"));
    assert!(!target.exists());
    assert_eq!(session.state(), SessionState::Ready);

    assert_eq!(session.size("hello.txt").unwrap(), 14);
    session.quit().unwrap();

    let received = server.join().unwrap();
    assert_eq!(received, vec!["SIZE missing.txt", "SIZE hello.txt", "QUIT"]);
}

#[test]
fn test_short_transfer_leaves_partial_file() {
    let (port, server) = start_server();
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join(SHORT_FILE);
    let mut session = open_session(port);

    let outcome = session
        .get(SHORT_FILE, Destination::Save(&target))
        .unwrap();
    assert!(!outcome.complete);
    assert_eq!(outcome.bytes_received, 40);
    assert_eq!(outcome.shortfall(), 60);
    assert_eq!(fs::metadata(&target).unwrap().len(), 40);

    server.join().unwrap();

    // The server hung up; the next command fails fatally and closes the session.
    assert!(session.list_all().unwrap_err().is_fatal());
    assert!(session.is_closed());
}
