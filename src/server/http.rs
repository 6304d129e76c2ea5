//! HTTP handlers for the predictor API

use axum::{
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::error::SalaryError;
use crate::evaluation::{residual_points, LogSummary, ResidualPoint};
use crate::predict::{
    career_insight, format_salary, ModelQualityMetrics, SalaryBreakdown, Submission,
    OFFLINE_MODEL_METRICS, PREDICTION_TIPS,
};
use crate::server::ServerState;
use crate::types::{
    Currency, EducationLevel, EvaluationRecord, ExperienceTier, Gender, PredictionRequest,
    AGE_RANGE, EXPERIENCE_RANGE, JOB_TITLES,
};

/// Prediction form as submitted by the page
#[derive(Debug, Clone, Deserialize)]
pub struct PredictForm {
    pub age: i64,
    pub gender: String,
    pub education_level: String,
    pub job_title: String,
    pub years_experience: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl PredictForm {
    pub fn into_request(self) -> Result<(PredictionRequest, Currency), SalaryError> {
        let age = u32::try_from(self.age)
            .map_err(|_| SalaryError::validation("age", format!("{} is not a valid age", self.age)))?;
        let years_experience = u32::try_from(self.years_experience).map_err(|_| {
            SalaryError::validation(
                "years of experience",
                format!("{} is not a valid number of years", self.years_experience),
            )
        })?;
        let currency = match self.currency.as_deref() {
            Some(c) => c.parse()?,
            None => Currency::default(),
        };

        let request = PredictionRequest {
            age,
            gender: self.gender.parse()?,
            education_level: self.education_level.parse()?,
            job_title: self.job_title,
            years_experience,
        };
        Ok((request, currency))
    }
}

#[derive(Debug, Serialize)]
pub struct BreakdownView {
    pub label: &'static str,
    pub share: f64,
    pub amount: f64,
    pub display: String,
}

/// Prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub id: String,
    pub display: String,
    pub currency: Currency,
    pub predicted_salary: f64,
    /// Simulated, not a measured salary
    pub synthetic_actual_salary: f64,
    pub error: f64,
    pub absolute_error: f64,
    pub tier: &'static str,
    pub breakdown: Vec<BreakdownView>,
    pub insight: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<EvaluationRecord>,
    pub summary: LogSummary,
    pub residuals: Vec<ResidualPoint>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub genders: Vec<&'static str>,
    pub education_levels: Vec<&'static str>,
    pub job_titles: Vec<&'static str>,
    pub currencies: Vec<&'static str>,
    pub age_range: (u32, u32),
    pub experience_range: (u32, u32),
    pub tips: Vec<&'static str>,
}

/// Optional form state for the live career insight
#[derive(Debug, Default, Deserialize)]
pub struct TierQuery {
    pub job_title: Option<String>,
    pub education_level: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TierResponse {
    pub years_experience: u32,
    pub tier: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub metrics: ModelQualityMetrics,
    /// Reported by offline training, not computed here
    pub source: &'static str,
}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub evaluation_log: String,
    pub started_at: String,
}

/// Map a prediction error to a JSON error response
pub fn error_response(err: &SalaryError) -> Response {
    let (status, kind) = match err {
        SalaryError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
        SalaryError::UnsupportedCategory { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "unsupported_category"),
        SalaryError::Persistence { .. } | SalaryError::MalformedLog { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "persistence")
        }
        SalaryError::ModelArtifact { .. } | SalaryError::InvalidPrediction { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "model")
        }
    };

    (
        status,
        Json(json!({
            "error": kind,
            "details": err.to_string()
        })),
    )
        .into_response()
}

fn predict_response(sub: &Submission, state: &ServerState) -> PredictResponse {
    let rate = state.service.settings().exchange_rate;
    let r = &sub.result;
    let breakdown = SalaryBreakdown::from_prediction(r.predicted_salary)
        .components
        .into_iter()
        .map(|c| BreakdownView {
            label: c.label,
            share: c.share,
            amount: c.amount,
            display: format_salary(c.amount, sub.currency, rate),
        })
        .collect();

    PredictResponse {
        id: sub.id.to_string(),
        display: sub.display.clone(),
        currency: sub.currency,
        predicted_salary: r.predicted_salary,
        synthetic_actual_salary: r.synthetic_actual_salary,
        error: r.error,
        absolute_error: r.absolute_error,
        tier: sub.tier.label(),
        breakdown,
        insight: career_insight(&r.request.job_title, r.request.education_level, r.request.years_experience),
        warning: sub.warning(),
    }
}

/// Map a body the form extractor could not decode to the same JSON error shape
fn rejection_response(rejection: &JsonRejection) -> Response {
    (
        rejection.status(),
        Json(json!({
            "error": "invalid_body",
            "details": rejection.body_text()
        })),
    )
        .into_response()
}

/// Prediction handler
pub async fn predict_handler(
    State(state): State<ServerState>,
    form: Result<Json<PredictForm>, JsonRejection>,
) -> Response {
    let form = match form {
        Ok(Json(form)) => form,
        Err(rejection) => {
            warn!("Prediction body rejected: {}", rejection.body_text());
            return rejection_response(&rejection);
        }
    };

    let (request, currency) = match form.into_request() {
        Ok(parsed) => parsed,
        Err(e) => return error_response(&e),
    };

    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || service.handle_submit(request, currency)).await;

    match outcome {
        Ok(Ok(sub)) => (StatusCode::OK, Json(predict_response(&sub, &state))).into_response(),
        Ok(Err(e)) => {
            if e.is_input_error() {
                warn!("Prediction rejected: {}", e);
            } else {
                error!("Prediction failed: {}", e);
            }
            error_response(&e)
        }
        Err(e) => {
            error!("Prediction task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Evaluation history handler
pub async fn history_handler(State(state): State<ServerState>) -> Response {
    let service = state.service.clone();
    let loaded = tokio::task::spawn_blocking(move || service.history()).await;

    match loaded {
        Ok(Ok(records)) => {
            let response = HistoryResponse {
                summary: LogSummary::from_records(&records),
                residuals: residual_points(&records),
                records,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Err(e)) => {
            error!("Failed to load evaluation history: {}", e);
            error_response(&e)
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal", "details": e.to_string() })),
        )
            .into_response(),
    }
}

/// Input domains for the form widgets
pub async fn catalog_handler() -> impl IntoResponse {
    let response = CatalogResponse {
        genders: Gender::ALL.iter().map(Gender::as_str).collect(),
        education_levels: EducationLevel::ALL.iter().map(EducationLevel::as_str).collect(),
        job_titles: JOB_TITLES.to_vec(),
        currencies: vec![Currency::Inr.code(), Currency::Usd.code()],
        age_range: AGE_RANGE,
        experience_range: EXPERIENCE_RANGE,
        tips: PREDICTION_TIPS.to_vec(),
    };
    Json(response)
}

/// Experience tier badge handler, with the career insight when the form names a job and education
pub async fn tier_handler(Path(years): Path<u32>, Query(query): Query<TierQuery>) -> impl IntoResponse {
    let education = query
        .education_level
        .as_deref()
        .and_then(|e| e.parse::<EducationLevel>().ok());
    let insight = match (query.job_title.as_deref(), education) {
        (Some(job), Some(education)) if !job.trim().is_empty() => Some(career_insight(job, education, years)),
        _ => None,
    };

    Json(TierResponse {
        years_experience: years,
        tier: ExperienceTier::from_years(years).label(),
        insight,
    })
}

/// Static model quality handler
pub async fn metrics_handler() -> impl IntoResponse {
    Json(MetricsResponse {
        metrics: OFFLINE_MODEL_METRICS,
        source: "offline training report",
    })
}

/// Status handler
pub async fn status_handler(State(state): State<ServerState>) -> impl IntoResponse {
    let response = StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.service.predictor_description(),
        evaluation_log: state.service.log().path().display().to_string(),
        started_at: state.started_at.to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::evaluation::EvaluationLog;
    use crate::model::{LinearSalaryModel, Predictor};
    use crate::predict::{PredictionService, PredictionSettings};
    use crate::server::router;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(log_dir: &std::path::Path) -> ServerState {
        let model_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("model/salary_predictor.json");
        let model: Arc<dyn Predictor> = Arc::new(LinearSalaryModel::load(model_path).unwrap());
        let service = PredictionService::new(
            model,
            EvaluationLog::new(log_dir.join("model_evaluation_table.csv")),
            PredictionSettings::default(),
        );
        ServerState::new(Config::default(), service)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn predict_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_form_conversion() {
        let form = PredictForm {
            age: 30,
            gender: "Male".to_string(),
            education_level: "Bachelor".to_string(),
            job_title: "Data Scientist".to_string(),
            years_experience: 5,
            currency: Some("$ (USD)".to_string()),
        };
        let (req, currency) = form.into_request().unwrap();
        assert_eq!(req.education_level, EducationLevel::Bachelor);
        assert_eq!(currency, Currency::Usd);

        let negative = PredictForm {
            age: -1,
            gender: "Male".to_string(),
            education_level: "Bachelor".to_string(),
            job_title: "Developer".to_string(),
            years_experience: 0,
            currency: None,
        };
        assert!(matches!(negative.into_request(), Err(SalaryError::Validation { field: "age", .. })));
    }

    #[tokio::test]
    async fn test_predict_then_history() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path()));

        let response = app
            .clone()
            .oneshot(predict_request(json!({
                "age": 30,
                "gender": "Male",
                "education_level": "Bachelor",
                "job_title": "Data Scientist",
                "years_experience": 5,
                "currency": "INR"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["display"], "₹74,500");
        assert_eq!(body["tier"], "Mid-Junior Level");
        assert_eq!(body["breakdown"].as_array().unwrap().len(), 3);
        assert!(body.get("warning").is_none());

        let response = app
            .oneshot(Request::builder().uri("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["records"].as_array().unwrap().len(), 1);
        assert_eq!(body["summary"]["count"], 1);
        assert_eq!(body["residuals"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tier_carries_live_insight() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/tier/12?job_title=Data%20Scientist&education_level=PhD")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["tier"], "Senior Expert");
        assert_eq!(
            body["insight"],
            "As a Data Scientist, professionals with 12 years of experience and PhD usually reach the Senior Expert tier in industry benchmarks."
        );

        let response = app
            .oneshot(Request::builder().uri("/api/tier/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["tier"], "Entry Level");
        assert!(body.get("insight").is_none());
        assert!(!dir.path().join("model_evaluation_table.csv").exists());
    }

    #[tokio::test]
    async fn test_malformed_body_gets_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path()));

        // Missing job_title, mistyped age
        let response = app
            .clone()
            .oneshot(predict_request(json!({
                "age": "thirty",
                "gender": "Male",
                "education_level": "Bachelor",
                "years_experience": 5
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid_body");
        assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/predict")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "invalid_body");
        assert!(!dir.path().join("model_evaluation_table.csv").exists());
    }

    #[tokio::test]
    async fn test_unknown_job_title_is_422() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path()));

        let response = app
            .oneshot(predict_request(json!({
                "age": 30,
                "gender": "Female",
                "education_level": "Master",
                "job_title": "Astronaut",
                "years_experience": 5
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"], "unsupported_category");
        assert!(!dir.path().join("model_evaluation_table.csv").exists());
    }

    #[tokio::test]
    async fn test_out_of_range_age_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path()));

        let response = app
            .oneshot(predict_request(json!({
                "age": 90,
                "gender": "Other",
                "education_level": "PhD",
                "job_title": "AI Researcher",
                "years_experience": 5
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "validation");
    }

    #[tokio::test]
    async fn test_empty_history_and_static_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(dir.path()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/history").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["records"].as_array().unwrap().is_empty());

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/tier/11").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["tier"], "Senior Expert");

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["test_r2"], 0.8882);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/catalog").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["job_titles"].as_array().unwrap().len(), JOB_TITLES.len());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
