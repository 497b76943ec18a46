//! Transfer modes
//!
//! Where downloaded bytes go: the display, or a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// How a download is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    View,
    Save,
}

/// A resolved output destination.
///
/// Nothing is opened until [`Destination::open`] is called, which the get
/// operation only does once the server has accepted the `GET`.
pub enum Destination<'a> {
    /// Append the payload to an already-open display.
    View(&'a mut dyn Write),
    /// Create (or truncate) the file at this path.
    Save(&'a Path),
}

impl<'a> Destination<'a> {
    pub fn mode(&self) -> TransferMode {
        match self {
            Destination::View(_) => TransferMode::View,
            Destination::Save(_) => TransferMode::Save,
        }
    }

    pub fn open(self) -> io::Result<Box<dyn Write + 'a>> {
        match self {
            Destination::View(out) => Ok(Box::new(out)),
            Destination::Save(path) => Ok(Box::new(File::create(path)?)),
        }
    }
}

impl std::fmt::Debug for Destination<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::View(_) => f.write_str("View"),
            Destination::Save(path) => f.debug_tuple("Save").field(path).finish(),
        }
    }
}
