//! Predictor adapter
//!
//! The model is an opaque artifact loaded once at start. Callers only see the
//! [`Predictor`] trait, so a different artifact or scoring runtime can be
//! swapped in as long as it honours the same feature schema.

pub mod linear;

pub use linear::{LinearSalaryModel, FEATURE_SCHEMA};

use crate::error::SalaryError;
use crate::types::PredictionRequest;

/// A pre-trained salary regressor
#[cfg_attr(test, mockall::automock)]
pub trait Predictor: Send + Sync {
    /// Estimated monthly salary for the request.
    ///
    /// Must fail with [`SalaryError::UnsupportedCategory`] for categorical
    /// values the model cannot encode, rather than coercing them.
    fn predict(&self, request: &PredictionRequest) -> Result<f64, SalaryError>;

    /// Short human-readable description of the loaded model
    fn describe(&self) -> String;
}
