//! Interactive session
//!
//! Server selection, the command menu, and every caller-level decision the
//! protocol core leaves open: View or Save, overwrite confirmation, and what
//! to do with a partial file.

use log::{info, warn};
use std::fs;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{ClientConfig, ServerEntry};
use crate::error::{ClientError, SessionError, report_error};
use crate::session::Session;
use crate::terminal::listing::{print_entry, print_summary};
use crate::terminal::prompt::{ask, choose, confirm};
use crate::transfer::{Destination, TransferMode, TransferOutcome};
use crate::utils::network::connect;

const MENU: &str = "\nL)ist  D)ownload  Q)uit\n> ";

/// Menu-driven front end over explicit input and output.
#[derive(Debug)]
pub struct Terminal<R: BufRead, W: Write> {
    input: R,
    output: W,
    config: ClientConfig,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W, config: ClientConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Selects a server, connects, and runs the menu until quit or a fatal error.
    pub fn run(&mut self) -> Result<(), ClientError> {
        let Some(server) = self.select_server()? else {
            return Ok(());
        };

        let port = self.config.port;
        writeln!(self.output, "Connecting to {} ({})...", server.name, server.host)?;
        let stream = connect(&server.host, port).map_err(|source| ClientError::Connect {
            host: server.host.clone(),
            port,
            source,
        })?;
        writeln!(self.output, "Connected to {}", server.host)?;

        let mut session = Session::new(stream, self.config.session_options())?;
        self.run_session(&mut session)
    }

    /// Shows the server menu. `None` if input ends first.
    pub fn select_server(&mut self) -> Result<Option<ServerEntry>, ClientError> {
        writeln!(self.output, "Which server?")?;
        for (i, server) in self.config.servers.iter().enumerate() {
            writeln!(self.output, "{}) {}", i + 1, server.name)?;
        }

        let count = self.config.servers.len();
        let choice = choose(&mut self.input, &mut self.output, "> ", count)?;
        let server = choice.map(|n| self.config.servers[n - 1].clone());
        if let Some(server) = &server {
            writeln!(self.output, "You chose {}", server.name)?;
        }
        Ok(server)
    }

    /// Runs the command menu over an established session.
    pub fn run_session<S: Read + Write>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<(), ClientError> {
        writeln!(self.output, "Server says: {}", session.greeting())?;

        loop {
            let Some(choice) = ask(&mut self.input, &mut self.output, MENU)? else {
                self.quit(session)?;
                return Ok(());
            };

            let result = match choice.to_ascii_uppercase().as_str() {
                "L" | "LIST" => self.show_listing(session),
                "D" | "DOWNLOAD" => self.download(session),
                "Q" | "QUIT" => {
                    self.quit(session)?;
                    return Ok(());
                }
                "" => continue,
                _ => {
                    writeln!(self.output, "Unknown choice {choice:?}")?;
                    continue;
                }
            };

            match result {
                Ok(()) => {}
                Err(ClientError::Session(e)) if !e.is_fatal() => {
                    report_error(&e);
                    writeln!(self.output, "Error: {e}")?;
                }
                Err(ClientError::Session(e)) => {
                    report_error(&e);
                    writeln!(self.output, "Connection lost: {e}")?;
                    return Err(ClientError::Session(e));
                }
                Err(other) => return Err(other),
            }
        }
    }

    fn quit<S: Read + Write>(&mut self, session: &mut Session<S>) -> Result<(), ClientError> {
        if let Err(e) = session.quit() {
            report_error(&e);
        }
        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn show_listing<S: Read + Write>(
        &mut self,
        session: &mut Session<S>,
    ) -> Result<(), ClientError> {
        let mut count = 0;
        for entry in session.list()? {
            print_entry(&mut self.output, &entry?)?;
            count += 1;
        }
        print_summary(&mut self.output, count)?;
        Ok(())
    }

    fn download<S: Read + Write>(&mut self, session: &mut Session<S>) -> Result<(), ClientError> {
        let Some(filename) = ask(&mut self.input, &mut self.output, "Filename: ")? else {
            return Ok(());
        };
        if filename.is_empty() {
            return Ok(());
        }

        let Some(mode) = self.ask_mode()? else {
            return Ok(());
        };

        match mode {
            TransferMode::View => {
                let outcome = session.get(&filename, Destination::View(&mut self.output))?;
                writeln!(self.output)?;
                self.report_outcome(&filename, &outcome, None)
            }
            TransferMode::Save => {
                let Some(path) = local_path(&filename) else {
                    writeln!(self.output, "Cannot save {filename:?}: no file name")?;
                    return Ok(());
                };
                if path.exists()
                    && !confirm(
                        &mut self.input,
                        &mut self.output,
                        &format!("{} exists. Overwrite?", path.display()),
                    )?
                {
                    writeln!(self.output, "Download cancelled.")?;
                    return Ok(());
                }

                match session.get(&filename, Destination::Save(&path)) {
                    Ok(outcome) => self.report_outcome(&filename, &outcome, Some(&path)),
                    Err(e @ SessionError::Sink { .. }) => {
                        if path.exists() {
                            writeln!(
                                self.output,
                                "Partial output left at {}",
                                path.display()
                            )?;
                        }
                        Err(e.into())
                    }
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    fn ask_mode(&mut self) -> Result<Option<TransferMode>, ClientError> {
        loop {
            let Some(answer) = ask(&mut self.input, &mut self.output, "V)iew or S)ave? ")?
            else {
                return Ok(None);
            };
            match answer.to_ascii_uppercase().as_str() {
                "V" | "VIEW" => return Ok(Some(TransferMode::View)),
                "S" | "SAVE" => return Ok(Some(TransferMode::Save)),
                _ => writeln!(self.output, "Please answer V or S.")?,
            }
        }
    }

    /// Prints the result; for an incomplete save, asks whether to keep the file.
    fn report_outcome(
        &mut self,
        filename: &str,
        outcome: &TransferOutcome,
        saved_to: Option<&Path>,
    ) -> Result<(), ClientError> {
        if outcome.complete {
            match saved_to {
                Some(path) => writeln!(
                    self.output,
                    "Saved {} bytes to {}",
                    outcome.bytes_received,
                    path.display()
                )?,
                None => writeln!(self.output, "Received {} bytes", outcome.bytes_received)?,
            }
            return Ok(());
        }

        writeln!(
            self.output,
            "Transfer of {filename} incomplete: received {} of {} bytes ({} missing)",
            outcome.bytes_received,
            outcome.declared_size,
            outcome.shortfall()
        )?;

        if let Some(path) = saved_to {
            if !confirm(&mut self.input, &mut self.output, "Keep partial file?")? {
                match fs::remove_file(path) {
                    Ok(()) => {
                        info!("Removed partial file {}", path.display());
                        writeln!(self.output, "Removed {}", path.display())?;
                    }
                    Err(e) => {
                        warn!("Failed to remove partial file {}: {e}", path.display());
                        writeln!(self.output, "Could not remove {}: {e}", path.display())?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Local file name for a download: the last component of the remote name.
fn local_path(filename: &str) -> Option<PathBuf> {
    Path::new(filename).file_name().map(PathBuf::from)
}
