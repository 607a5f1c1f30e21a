//! Error types for image-fetcher
//!
//! Failures are split into two categories: network errors (the request never produced a
//! usable response) and everything else. Content-type and duplicate rejections are not
//! errors; see [`crate::FetchOutcome`].

use std::fmt;

/// Main error type for image-fetcher operations
#[derive(Debug)]
pub enum Error {
    /// URL could not be parsed into a requestable target
    InvalidUrl(String),

    /// Connection failure, timeout, or interrupted body
    NetworkError(String),

    /// Server answered with a non-success status
    HttpError(reqwest::StatusCode),

    /// Response header present but unreadable
    InvalidHeader(String),

    /// File I/O error
    IoError(std::io::Error),
}

impl Error {
    /// Whether this failure happened while talking to the server.
    ///
    /// Callers use this to tell a connection problem apart from a local one
    /// (filesystem, malformed headers) without matching on messages.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_) | Error::NetworkError(_) | Error::HttpError(_)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidUrl(msg) => {
                write!(f, "Invalid URL: {}", msg)
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::HttpError(status) => {
                write!(f, "HTTP error: {}", status)
            }
            Error::InvalidHeader(msg) => {
                write!(f, "Invalid header: {}", msg)
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if err.is_status() => Error::HttpError(status),
            _ if err.is_builder() => Error::InvalidUrl(err.to_string()),
            _ => Error::NetworkError(err.to_string()),
        }
    }
}

/// Convenience result type for image-fetcher operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(Error::InvalidUrl("no scheme".to_string()).is_network());
        assert!(Error::NetworkError("connection refused".to_string()).is_network());
        assert!(Error::HttpError(reqwest::StatusCode::NOT_FOUND).is_network());

        assert!(!Error::InvalidHeader("content-type".to_string()).is_network());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(!Error::IoError(io).is_network());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::HttpError(reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "HTTP error: 404 Not Found");

        let err = Error::NetworkError("timed out".to_string());
        assert_eq!(err.to_string(), "Network error: timed out");
    }

    #[test]
    fn test_from_parse_error() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_io_error_source() {
        use std::error::Error as _;

        let err = Error::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("disk full"));
    }
}
