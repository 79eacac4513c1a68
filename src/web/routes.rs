//! REST API routes

use super::error::ApiError;
use super::AppState;
use crate::classifier::{calculate_risk, compliance_hint};
use crate::db::{Database, RiskSummary};
use crate::{RiskAssessment, RiskLevel, RiskSubmission};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Health
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

pub async fn health(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "GRC Risk Assessment API is running".to_string(),
        status: "ok".to_string(),
    })
}

// ============================================================================
// Risk Assessment
// ============================================================================

/// A stored record plus its recomputed compliance hint. The hint is derived
/// from the level on every response and never persisted.
#[derive(Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub record: RiskAssessment,
    pub compliance_hint: Option<&'static str>,
}

impl AssessmentResponse {
    fn from_record(record: RiskAssessment) -> Self {
        let compliance_hint = compliance_hint(record.level);
        Self {
            record,
            compliance_hint,
        }
    }
}

pub async fn assess_risk(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RiskSubmission>,
) -> Result<(StatusCode, Json<AssessmentResponse>), ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let (score, level) = calculate_risk(body.likelihood, body.impact);

    let db = Database::connect(&state.db_path).map_err(ApiError::Store)?;
    let record = db.insert_risk(&body, score, level).map_err(ApiError::Store)?;

    info!("Risk created: ID={}, Level={}", record.id, record.level);

    Ok((
        StatusCode::CREATED,
        Json(AssessmentResponse::from_record(record)),
    ))
}

#[derive(Deserialize)]
pub struct RisksQuery {
    pub level: Option<String>,
}

pub async fn list_risks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RisksQuery>,
) -> Result<Json<Vec<AssessmentResponse>>, ApiError> {
    // An empty level parameter means no filter, same as omitting it
    let level = query.level.as_deref().filter(|s| !s.is_empty());

    let db = Database::connect(&state.db_path).map_err(ApiError::Store)?;
    let risks = db.list_risks(level).map_err(ApiError::Store)?;

    Ok(Json(
        risks.into_iter().map(AssessmentResponse::from_record).collect(),
    ))
}

// ============================================================================
// Aggregates
// ============================================================================

pub async fn risk_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RiskSummary>, ApiError> {
    let db = Database::connect(&state.db_path).map_err(ApiError::Store)?;
    let summary = db.summary().map_err(ApiError::Store)?;
    Ok(Json(summary))
}

/// One cell of the 5x5 likelihood/impact matrix
#[derive(Serialize)]
pub struct MatrixCell {
    pub likelihood: u32,
    pub impact: u32,
    pub score: u32,
    pub level: RiskLevel,
    pub count: i64,
}

#[derive(Serialize)]
pub struct MatrixResponse {
    pub cells: Vec<MatrixCell>,
}

/// Return all 25 matrix cells, including empty ones, so clients can render
/// the full grid without filling gaps themselves.
pub async fn risk_matrix(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MatrixResponse>, ApiError> {
    let db = Database::connect(&state.db_path).map_err(ApiError::Store)?;
    let counts = db.matrix_counts().map_err(ApiError::Store)?;

    let mut cells = Vec::with_capacity(25);
    for likelihood in 1..=5u32 {
        for impact in 1..=5u32 {
            let (score, level) = calculate_risk(likelihood, impact);
            cells.push(MatrixCell {
                likelihood,
                impact,
                score,
                level,
                count: counts[likelihood as usize - 1][impact as usize - 1],
            });
        }
    }

    Ok(Json(MatrixResponse { cells }))
}
