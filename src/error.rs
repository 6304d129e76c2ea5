//! Error taxonomy for the prediction cycle
//!
//! Every failure is scoped to a single submission. Validation and
//! unsupported-category errors abort the prediction; persistence errors are
//! downgraded to warnings by the request handler.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the predictor, the evaluation log and the request handler
#[derive(Debug, Error)]
pub enum SalaryError {
    /// A request field is outside its allowed domain
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// The model has no encoding for a categorical value
    #[error("the model cannot encode {feature} '{value}'")]
    UnsupportedCategory {
        feature: &'static str,
        value: String,
    },

    /// Writing (or reading) the evaluation log failed
    #[error("evaluation log {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The evaluation log exists but cannot be parsed
    #[error("evaluation log {} line {line}: {reason}", path.display())]
    MalformedLog {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The model artifact is missing, unreadable or has the wrong schema
    #[error("model artifact {}: {reason}", path.display())]
    ModelArtifact {
        path: PathBuf,
        reason: String,
    },

    /// The model produced a NaN or infinite salary
    #[error("model {model} produced a non-finite prediction ({value})")]
    InvalidPrediction {
        model: String,
        value: f64,
    },
}

impl SalaryError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        SalaryError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn unsupported(feature: &'static str, value: impl Into<String>) -> Self {
        SalaryError::UnsupportedCategory {
            feature,
            value: value.into(),
        }
    }

    /// Whether the error rejects the user's input (as opposed to an environment failure)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SalaryError::Validation { .. } | SalaryError::UnsupportedCategory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SalaryError::validation("age", "must be between 18 and 65");
        assert_eq!(err.to_string(), "invalid age: must be between 18 and 65");

        let err = SalaryError::unsupported("Job Title", "Astronaut");
        assert_eq!(err.to_string(), "the model cannot encode Job Title 'Astronaut'");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(SalaryError::validation("age", "too young").is_input_error());
        assert!(SalaryError::unsupported("Gender", "X").is_input_error());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SalaryError::Persistence {
            path: PathBuf::from("log.csv"),
            source: io,
        };
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("log.csv"));
    }
}
