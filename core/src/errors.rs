use thiserror::Error;

use crate::validation::ValidationError;

/// Message surfaced when the model answers without a structured function call.
pub const EXTRACTION_FAILED_MESSAGE: &str =
    "AI failed to generate structured data. Please try again.";

/// Errors raised while analyzing meeting notes
#[derive(Error, Debug)]
pub enum MinutesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{}", EXTRACTION_FAILED_MESSAGE)]
    ExtractionFailed,

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Response Error: {0}")]
    ResponseError(String),

    #[error("Parsing Error: {0}")]
    ParsingError(String),

    #[error("HTTP Error: {status_code} - {message}")]
    HttpError { status_code: u16, message: String },
}

impl MinutesError {
    /// True for failures caused by what the user submitted rather than by
    /// the model or the transport.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidDataUri(_))
    }
}

/// Result type for meeting-notes operations
pub type MinutesResult<T> = Result<T, MinutesError>;
