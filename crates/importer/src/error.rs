use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("fetch failed after {attempts} attempts: {url}")]
    FetchExhausted { url: String, attempts: u32 },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to serialize snapshot: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    ImportError(String),
}
