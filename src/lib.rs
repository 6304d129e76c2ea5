//! Salary Predictor Library
//!
//! One prediction request cycle:
//! - validate the employee attributes
//! - score them with a pre-trained model artifact
//! - simulate an "actual" salary and derive error metrics
//! - append the result to a CSV evaluation log
//! - format the salary for display in INR or USD
//!
//! # Example
//!
//! ```ignore
//! use salary_predictor::{Config, PredictionService, PredictionRequest, Currency};
//!
//! let service = PredictionService::from_config(&Config::default())?;
//! let submission = service.handle_submit(request, Currency::Usd)?;
//! println!("{}", submission.display);
//! ```

pub mod types;
pub mod error;
pub mod model;
pub mod evaluation;
pub mod predict;
pub mod config;
pub mod server;
pub mod cli;

pub use types::{
    Currency,
    EducationLevel,
    EvaluationRecord,
    ExperienceTier,
    Gender,
    PredictionRequest,
    PredictionResult,
};

pub use error::SalaryError;

pub use model::{LinearSalaryModel, Predictor};

pub use evaluation::{EvaluationLog, LogSummary};

pub use predict::{
    format_salary,
    PredictionService,
    PredictionSettings,
    Submission,
};

pub use config::Config;

pub use server::{
    ServerState,
    start as start_server,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Employee Salary Predictor", NAME, VERSION)
}
