// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Segment bounds {start}..{end} do not fall on character boundaries of the normalized text")]
    InvalidSegment { start: usize, end: usize },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Errors surfaced by the HTTP layer. Rendered as `{ "error": ... }` by the server.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Extraction(#[from] ExtractError),

    #[error("{0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages_are_bare() {
        let err = ApiError::InvalidInput("toc_text and pdf_text must both be non-empty".to_string());
        assert_eq!(err.to_string(), "toc_text and pdf_text must both be non-empty");

        let err = ApiError::from(ExtractError::InvalidSegment { start: 3, end: 1 });
        assert!(err.to_string().starts_with("Segment bounds 3..1"));
    }

    #[test]
    fn test_app_error_wraps_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = AppError::from(StorageError::from(io));
        assert_eq!(err.to_string(), "Storage error: I/O error: denied");
    }
}
