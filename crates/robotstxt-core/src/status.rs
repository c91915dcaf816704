//! HTTP status policy for fetched robots.txt files.
//!
//! Maps the outcome of fetching `/robots.txt` onto a document:
//!
//! - `2xx`: the body is parsed.
//! - `4xx`: no usable file exists, so nothing is restricted.
//! - `5xx`: the server is failing, so everything is restricted.
//!
//! Any other status is rejected. Fetching itself is left to the caller.

use crate::parse::{ParseError, ParserConfig, RobotsData, parse_with_config};
use http::StatusCode;
use log::debug;
use std::io::Read;
use thiserror::Error;

/// Errors from turning a fetch result into a [`RobotsData`].
#[derive(Debug, Error)]
pub enum RobotsError {
    /// The body was fetched but could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The status code has no defined policy (e.g. 1xx or 3xx).
    #[error("unexpected status: {0}")]
    UnexpectedStatus(u16),

    /// Reading the body failed.
    #[error("failed to read robots.txt body: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds a document from a status code and response body.
pub fn from_status_and_bytes(status: StatusCode, body: &[u8]) -> Result<RobotsData, RobotsError> {
    from_status_with_config(status, body, &ParserConfig::default())
}

/// Like [`from_status_and_bytes`], parsing a successful body with `config`.
pub fn from_status_with_config(
    status: StatusCode,
    body: &[u8],
    config: &ParserConfig,
) -> Result<RobotsData, RobotsError> {
    if status.is_success() {
        return Ok(parse_with_config(body, config)?);
    }
    if status.is_client_error() {
        debug!("Status {}: treating robots.txt as allow-all", status.as_u16());
        return Ok(RobotsData::allow_all());
    }
    if status.is_server_error() {
        debug!("Status {}: treating robots.txt as disallow-all", status.as_u16());
        return Ok(RobotsData::disallow_all());
    }
    Err(RobotsError::UnexpectedStatus(status.as_u16()))
}

/// Builds a document from a status code and a string body.
pub fn from_status_and_str(status: StatusCode, body: &str) -> Result<RobotsData, RobotsError> {
    from_status_and_bytes(status, body.as_bytes())
}

/// Builds a document from a status code, reading the body from `reader`.
///
/// The body is only read when the status calls for parsing it.
pub fn from_status_and_reader<R: Read>(
    status: StatusCode,
    mut reader: R,
) -> Result<RobotsData, RobotsError> {
    if !status.is_success() {
        return from_status_and_bytes(status, &[]);
    }
    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;
    from_status_and_bytes(status, &body)
}

/// Builds a document from a raw numeric status code.
pub fn from_status_code(code: u16, body: &[u8]) -> Result<RobotsData, RobotsError> {
    let status = StatusCode::from_u16(code).map_err(|_| RobotsError::UnexpectedStatus(code))?;
    from_status_and_bytes(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const BODY: &str = "User-agent: *\nDisallow: /private\n";

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("connection reset"))
        }
    }

    #[test]
    fn success_parses_body() {
        let data = from_status_and_str(StatusCode::OK, BODY).unwrap();
        assert!(!data.test_agent("bot", "/private/x"));
        assert!(data.test_agent("bot", "/public"));
    }

    #[test]
    fn success_with_empty_body_allows_all() {
        let data = from_status_and_str(StatusCode::OK, "").unwrap();
        assert!(data.is_allow_all());
    }

    #[test]
    fn client_errors_allow_all() {
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::GONE,
        ] {
            let data = from_status_and_str(status, BODY).unwrap();
            assert!(data.is_allow_all(), "status {}", status);
            assert!(data.test_agent("bot", "/private/x"));
        }
    }

    #[test]
    fn server_errors_disallow_all() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let data = from_status_and_str(status, BODY).unwrap();
            assert!(data.is_disallow_all(), "status {}", status);
            assert!(!data.test_agent("bot", "/"));
        }
    }

    #[test]
    fn other_statuses_are_rejected() {
        for status in [StatusCode::CONTINUE, StatusCode::MOVED_PERMANENTLY] {
            let err = from_status_and_str(status, BODY).unwrap_err();
            assert!(matches!(err, RobotsError::UnexpectedStatus(code) if code == status.as_u16()));
        }
        assert_eq!(
            RobotsError::UnexpectedStatus(302).to_string(),
            "unexpected status: 302"
        );
    }

    #[test]
    fn parse_errors_are_surfaced() {
        let err = from_status_and_str(StatusCode::OK, "Disallow: /x\n").unwrap_err();
        assert!(matches!(err, RobotsError::Parse(_)));
        assert!(err.to_string().contains("before User-agent"));
    }

    #[test]
    fn config_applies_to_successful_bodies() {
        let body = b"User-agent: *\nCrawl-delay: soon\nDisallow: /x\n";
        assert!(from_status_with_config(StatusCode::OK, body, &ParserConfig::lenient()).is_ok());

        let err = from_status_with_config(StatusCode::OK, body, &ParserConfig::strict()).unwrap_err();
        assert!(matches!(err, RobotsError::Parse(_)));

        // Error statuses never look at the body
        let data =
            from_status_with_config(StatusCode::NOT_FOUND, body, &ParserConfig::strict()).unwrap();
        assert!(data.is_allow_all());
    }

    #[test]
    fn reader_body_is_parsed() {
        let data = from_status_and_reader(StatusCode::OK, BODY.as_bytes()).unwrap();
        assert!(!data.test_agent("bot", "/private"));
    }

    #[test]
    fn reader_errors_are_surfaced_unchanged() {
        let err = from_status_and_reader(StatusCode::OK, FailingReader).unwrap_err();
        match err {
            RobotsError::Io(e) => assert_eq!(e.to_string(), "connection reset"),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn reader_is_not_read_for_error_statuses() {
        let data = from_status_and_reader(StatusCode::NOT_FOUND, FailingReader).unwrap();
        assert!(data.is_allow_all());
    }

    #[test]
    fn numeric_status_codes() {
        assert!(from_status_code(404, b"").unwrap().is_allow_all());
        assert!(from_status_code(503, b"").unwrap().is_disallow_all());
        assert!(matches!(
            from_status_code(1000, b""),
            Err(RobotsError::UnexpectedStatus(1000))
        ));
    }
}
