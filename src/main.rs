//! LFT Client - Entry Point
//!
//! Interactive client for the LIST/SIZE/GET/QUIT file transfer protocol.

use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use lft_client::ClientConfig;
use lft_client::terminal::Terminal;
use lft_client::utils::logging::setup_logging;

fn main() -> ExitCode {
    setup_logging();

    // Optional first argument: path to a configuration file
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match ClientConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Starting client ({} servers configured)", config.servers.len());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut terminal = Terminal::new(stdin.lock(), stdout.lock(), config);

    match terminal.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
