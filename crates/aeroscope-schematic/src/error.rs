//! Error types for schematic generation.

use std::fmt;

/// Result type for schematic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a schematic.
#[derive(Debug)]
pub enum Error {
    /// No API key was configured.
    MissingApiKey,
    /// HTTP request failed.
    Http {
        /// The URL that failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// HTTP response had a non-success status code.
    HttpStatus {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The response could not be decoded.
    InvalidResponse {
        /// Context for where the error occurred.
        context: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
    /// The response contained no image.
    EmptyResponse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingApiKey => f.write_str("no API key configured"),
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::HttpStatus { url, status } => {
                write!(f, "http request to {url} returned status {status}")
            }
            Error::InvalidResponse { context, detail } => {
                write!(f, "invalid {context}: {detail}")
            }
            Error::EmptyResponse => f.write_str("response contained no image"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidResponse {
            context: "json",
            detail: e.to_string(),
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::InvalidResponse {
            context: "inline image data",
            detail: e.to_string(),
        }
    }
}
