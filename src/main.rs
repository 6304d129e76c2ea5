//! Salary Predictor - monthly employee salary demo
//!
//! Predicts a salary from five employee attributes and keeps a running
//! evaluation log of past predictions.

use salary_predictor::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (INFO by default, override with RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    cli::run().await
}
