//! Response classification
//!
//! A status line is `+OK` or anything else. There is no third outcome.

/// Status token marking a successful reply.
pub const OK_TOKEN: &str = "+OK";

/// A classified status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Remainder after `+OK`, minus one leading space.
    Ok(String),
    /// The full line, kept for diagnostics.
    Err(String),
}

impl Response {
    pub fn parse(line: &str) -> Self {
        match line.strip_prefix(OK_TOKEN) {
            Some(rest) => Response::Ok(rest.strip_prefix(' ').unwrap_or(rest).to_string()),
            None => Response::Err(line.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok(_))
    }

    pub fn payload(&self) -> &str {
        match self {
            Response::Ok(payload) | Response::Err(payload) => payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_with_payload() {
        assert_eq!(Response::parse("+OK 42"), Response::Ok("42".to_string()));
        assert_eq!(Response::parse("+OK 42"), Response::parse("+OK 42"));
    }

    #[test]
    fn test_parse_bare_ok() {
        let response = Response::parse("+OK");
        assert!(response.is_ok());
        assert_eq!(response.payload(), "");
    }

    #[test]
    fn test_only_one_space_is_trimmed() {
        assert_eq!(Response::parse("+OK  7"), Response::Ok(" 7".to_string()));
    }

    #[test]
    fn test_parse_err_keeps_full_line() {
        assert_eq!(
            Response::parse("-ERR boom"),
            Response::Err("-ERR boom".to_string())
        );
        assert_eq!(Response::parse(""), Response::Err(String::new()));
        assert_eq!(Response::parse("+O"), Response::Err("+O".to_string()));
        assert!(!Response::parse("OK fine").is_ok());
    }
}
