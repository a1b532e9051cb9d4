use thiserror::Error;

/// Application-wide error types for Argus.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP request failed (fetching a page).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Every identity profile failed for the URL, retries included.
    #[error("Failed after multiple retries and headers")]
    FetchExhausted,

    /// Visible-text extraction failed.
    #[error("Text extraction failed: {0}")]
    CleanerError(String),

    /// Model API call failed.
    #[error("Classifier error (HTTP {status_code}): {message}")]
    ClassifierError { message: String, status_code: u16 },

    /// Decision log operation failed.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Outcome email could not be built or delivered.
    #[error("Mail error: {0}")]
    MailError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
