//! Request handler - one prediction from input to log entry
//!
//! validate -> predict -> simulate an "actual" value -> derive errors ->
//! append to the evaluation log -> format for display.

use anyhow::{bail, Result};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::format::{format_salary, ExchangeRate};
use crate::config::{Config, PredictionConfig};
use crate::error::SalaryError;
use crate::evaluation::EvaluationLog;
use crate::model::{LinearSalaryModel, Predictor};
use crate::types::{Currency, EvaluationRecord, ExperienceTier, PredictionRequest, PredictionResult};

/// Tunables of the request handler
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionSettings {
    /// Half-width of the uniform integer noise added to simulate an actual salary
    pub noise_range: u32,
    pub exchange_rate: ExchangeRate,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            noise_range: 10_000,
            exchange_rate: ExchangeRate::default(),
        }
    }
}

impl PredictionSettings {
    pub fn from_config(config: &PredictionConfig) -> Result<Self> {
        let Some(exchange_rate) = ExchangeRate::from_f64(config.usd_exchange_rate) else {
            bail!(
                "usd_exchange_rate must be a positive number, got {}",
                config.usd_exchange_rate
            );
        };
        Ok(Self {
            noise_range: config.noise_range,
            exchange_rate,
        })
    }
}

/// Everything produced by one submission
#[derive(Debug)]
pub struct Submission {
    pub id: Uuid,
    pub result: PredictionResult,
    pub currency: Currency,
    /// Predicted salary formatted in `currency`
    pub display: String,
    pub tier: ExperienceTier,
    /// Set when the result could not be written to the evaluation log
    pub persistence_error: Option<SalaryError>,
}

impl Submission {
    pub fn warning(&self) -> Option<String> {
        self.persistence_error
            .as_ref()
            .map(|e| format!("Prediction shown but not saved to history: {}", e))
    }
}

pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
    log: EvaluationLog,
    settings: PredictionSettings,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>, log: EvaluationLog, settings: PredictionSettings) -> Self {
        Self {
            predictor,
            log,
            settings,
        }
    }

    /// Load the model artifact and open the evaluation log named by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = PredictionSettings::from_config(&config.prediction)?;
        let model = LinearSalaryModel::load(&config.paths.model)?;
        let log = EvaluationLog::new(config.paths.evaluation_log.clone());
        Ok(Self::new(Arc::new(model), log, settings))
    }

    pub fn settings(&self) -> &PredictionSettings {
        &self.settings
    }

    pub fn log(&self) -> &EvaluationLog {
        &self.log
    }

    pub fn predictor_description(&self) -> String {
        self.predictor.describe()
    }

    /// Run one prediction with thread-local randomness for the simulated actual salary
    pub fn handle_submit(&self, request: PredictionRequest, currency: Currency) -> Result<Submission, SalaryError> {
        self.handle_submit_with_rng(request, currency, &mut rand::rng())
    }

    /// Run one prediction.
    ///
    /// Input and model errors abort before the log is touched. A failed log
    /// write does not: the submission comes back with `persistence_error` set.
    pub fn handle_submit_with_rng<R: Rng + ?Sized>(
        &self,
        request: PredictionRequest,
        currency: Currency,
        rng: &mut R,
    ) -> Result<Submission, SalaryError> {
        request.validate()?;

        let predicted = self.predictor.predict(&request)?;
        if !predicted.is_finite() {
            return Err(SalaryError::InvalidPrediction {
                model: self.predictor.describe(),
                value: predicted,
            });
        }

        // Simulated ground truth: no real outcome exists for a demo submission
        let range = i64::from(self.settings.noise_range);
        let noise = rng.random_range(-range..=range) as f64;
        let result = PredictionResult::new(request, predicted, noise);

        let persistence_error = match self.log.append(&EvaluationRecord::from(&result)) {
            Ok(()) => None,
            Err(e) => {
                warn!("Evaluation log not updated: {}", e);
                Some(e)
            }
        };

        let id = Uuid::new_v4();
        let tier = result.request.tier();
        let formatted = format_salary(result.predicted_salary, currency, self.settings.exchange_rate);
        info!(
            "Prediction {}: {} / {} / {} yrs -> {}",
            id, result.request.job_title, result.request.education_level, result.request.years_experience, formatted
        );

        Ok(Submission {
            id,
            result,
            currency,
            display: formatted,
            tier,
            persistence_error,
        })
    }

    /// Full evaluation history in append order
    pub fn history(&self) -> Result<Vec<EvaluationRecord>, SalaryError> {
        self.log.load_all()
    }
}
