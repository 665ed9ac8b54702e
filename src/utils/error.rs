use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request for '{url}' returned status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
