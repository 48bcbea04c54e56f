use thiserror::Error;

/// Failure to obtain or decode the source sheet.
///
/// Cloneable so a single failed fetch can be handed to every caller that was
/// waiting on the same in-flight request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Response from {url} is not text (content type: {content_type})")]
    NotText { url: String, content_type: String },
    #[error("Failed to decode sheet: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Export error: {0}")]
    Export(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Export(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
