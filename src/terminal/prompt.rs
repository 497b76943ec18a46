//! Prompt helpers
//!
//! Line-based questions over an explicit input and output.

use std::io::{self, BufRead, Write};

/// Writes `message`, flushes, and reads one trimmed answer. `None` on end of input.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks a yes/no question. Anything but `y`/`yes` (including end of input) is no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    let answer = ask(input, output, &format!("{question} (y/n) "))?;
    Ok(matches!(
        answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("y" | "yes")
    ))
}

/// Asks for a number in `1..=max` until one is given. `None` on end of input.
pub fn choose<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    max: usize,
) -> io::Result<Option<usize>> {
    loop {
        let Some(answer) = ask(input, output, message)? else {
            return Ok(None);
        };
        match answer.parse::<usize>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
            _ => writeln!(output, "Please enter a number from 1 to {max}.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_trims_and_detects_eof() {
        let mut input: &[u8] = b"  hello \n";
        let mut output = Vec::new();
        assert_eq!(
            ask(&mut input, &mut output, "> ").unwrap().as_deref(),
            Some("hello")
        );
        assert_eq!(ask(&mut input, &mut output, "> ").unwrap(), None);
        assert_eq!(output, b"> > ");
    }

    #[test]
    fn test_confirm() {
        let mut input: &[u8] = b"Y\nno\n";
        let mut output = Vec::new();
        assert!(confirm(&mut input, &mut output, "Sure?").unwrap());
        assert!(!confirm(&mut input, &mut output, "Sure?").unwrap());
        assert!(!confirm(&mut input, &mut output, "Sure?").unwrap());
    }

    #[test]
    fn test_choose_reprompts() {
        let mut input: &[u8] = b"0\nabc\n2\n";
        let mut output = Vec::new();
        assert_eq!(choose(&mut input, &mut output, "> ", 2).unwrap(), Some(2));
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Please enter").count(), 2);
    }
}
