//! Listing display

use std::io::{self, Write};

pub fn print_entry<W: Write>(output: &mut W, entry: &str) -> io::Result<()> {
    writeln!(output, "  {entry}")
}

pub fn print_summary<W: Write>(output: &mut W, count: usize) -> io::Result<()> {
    match count {
        0 => writeln!(output, "(no files)"),
        1 => writeln!(output, "(1 file)"),
        n => writeln!(output, "({n} files)"),
    }
}
