use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}")]
    Server { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Raw response body for server-side failures, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Server { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
