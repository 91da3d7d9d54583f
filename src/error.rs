//! Error types for ProdView
//!
//! Covers the product fetch, decoding, and the command-line surface

use thiserror::Error;

/// Main error type for ProdView operations
#[derive(Error, Debug)]
pub enum ProdViewError {
    #[error("Invalid endpoint '{0}': {1}")]
    InvalidEndpoint(String, String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("Failed to decode product list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid page {0}: pages start at 1")]
    InvalidPage(usize),

    #[error("Unsupported export format '{0}' (expected json or csv)")]
    UnsupportedFormat(String),

    #[error("Product loader stopped before delivering a result")]
    LoaderDisconnected,

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("GUI error: {0}")]
    Gui(String),
}

/// Result type alias for ProdView operations
pub type Result<T> = std::result::Result<T, ProdViewError>;

impl ProdViewError {
    /// HTTP status code carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ProdViewError::UnexpectedStatus { status, .. } => Some(*status),
            ProdViewError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error came from talking to the product endpoint
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ProdViewError::Http(_)
                | ProdViewError::UnexpectedStatus { .. }
                | ProdViewError::Decode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_unexpected_status() {
        let err = ProdViewError::UnexpectedStatus {
            status: 503,
            endpoint: "http://localhost/products".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert!(err.is_fetch_error());
        assert_eq!(
            err.to_string(),
            "Unexpected HTTP status 503 from http://localhost/products"
        );
    }

    #[test]
    fn cli_errors_are_not_fetch_errors() {
        assert!(!ProdViewError::InvalidPage(0).is_fetch_error());
        assert!(!ProdViewError::UnsupportedFormat("xml".into()).is_fetch_error());
        assert_eq!(ProdViewError::InvalidPage(0).status(), None);
    }
}
