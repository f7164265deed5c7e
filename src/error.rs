//! Error handling for the applicant matcher
//!
//! The matching functions themselves are total and never return errors.
//! Everything around them (loading files, the workspace store, output) does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = MatcherError::NotFound("pipeline-123".to_string());
        assert_eq!(err.to_string(), "Not found: pipeline-123");
    }

    #[test]
    fn test_from_anyhow() {
        let err: MatcherError = anyhow::anyhow!("bad applicants file").into();
        assert!(matches!(err, MatcherError::InvalidInput(_)));
        assert!(err.to_string().contains("bad applicants file"));
    }
}
