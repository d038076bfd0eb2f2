//! Error types for the MCQ pipeline

use thiserror::Error;

/// Result type alias for the MCQ pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the MCQ pipeline
///
/// Per-record validation failures are not errors; they are reported as
/// [`crate::mcq::Rejection`] values inside a parse report.
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    MissingFile { path: String },

    /// PDF exists but could not be opened or its text could not be read
    #[error("Failed to extract text: {reason}")]
    Extraction { reason: String },

    /// PDF is password protected
    #[error("PDF is password protected")]
    PasswordRequired,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Week outside the configured range
    #[error("Week {week} out of range (total: {total})")]
    WeekOutOfRange { week: u32, total: u32 },

    /// Parsed question file for a week does not exist
    #[error("No question bank for week {week} at {path}")]
    QuestionBankMissing { week: u32, path: String },

    /// Question bank too small for the requested quiz size
    #[error("Week {week} has {available} questions, {required} required")]
    NotEnoughQuestions {
        week: u32,
        available: usize,
        required: usize,
    },

    /// Submitted answers do not line up with the served quiz
    #[error("Answer count mismatch: expected {expected}, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },
}

impl Error {
    /// Whether this error means a single document could not be read.
    ///
    /// These failures cost one week its records and never abort a batch.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            Error::MissingFile { .. }
                | Error::Extraction { .. }
                | Error::PasswordRequired
                | Error::Io(_)
        )
    }
}
