use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl AnalyticsError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
