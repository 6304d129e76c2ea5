//! Evaluation log: persisted history of predictions and statistics over it

pub mod store;
pub mod summary;

pub use store::EvaluationLog;
pub use summary::{residual_points, LogSummary, ResidualPoint};
