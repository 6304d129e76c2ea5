//! Request handling for salary predictions
//!
//! - `service`: the submit cycle (validate, predict, simulate, log, format)
//! - `format`: currency-aware salary strings
//! - `insight`: breakdown, career insight and static model metrics

pub mod format;
pub mod insight;
pub mod service;

pub use format::{format_salary, ExchangeRate};
pub use insight::{
    career_insight, ModelQualityMetrics, SalaryBreakdown, OFFLINE_MODEL_METRICS, PREDICTION_TIPS,
};
pub use service::{PredictionService, PredictionSettings, Submission};
