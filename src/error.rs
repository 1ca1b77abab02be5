// Error types for the starlist application.
// Handles GitHub API errors, cache store errors, and general application errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarlistError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StarlistError>;
