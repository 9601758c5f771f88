use axum::{extract::State, response::Json, Json as JsonExtractor};
use colorgorical_scores::{PairRow, PenaltyRow};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::ScoringService;

/// Pair kernel input: `[L1, a1, b1, L2, a2, b2]` per row, on the 5-unit grid
#[derive(Debug, Deserialize, ToSchema)]
pub struct PairBatchRequest {
    #[schema(value_type = Vec<Vec<f64>>)]
    pub rows: Vec<PairRow>,
}

/// Penalty kernel input: `[L, a, b]` per row, on the 5-unit grid
#[derive(Debug, Deserialize, ToSchema)]
pub struct PenaltyBatchRequest {
    #[schema(value_type = Vec<Vec<f64>>)]
    pub rows: Vec<PenaltyRow>,
}

/// Kernel output rows; unused slots are `null`
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchResponse {
    pub rows: Vec<Vec<Option<f64>>>,
}

impl<const W: usize> From<Vec<[f64; W]>> for BatchResponse {
    fn from(rows: Vec<[f64; W]>) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&v| (!v.is_nan()).then_some(v)).collect())
            .collect();
        Self { rows }
    }
}

/// Score color pairs
///
/// Output rows are `[de, nd, pp, nu1, nu2, null]`.
#[utoipa::path(
    post,
    path = "/api/batch/pairs",
    request_body = PairBatchRequest,
    responses(
        (status = 200, description = "Rows scored", body = BatchResponse),
        (status = 400, description = "A row is off the grid or out of range"),
    ),
    tag = "Batch"
)]
pub async fn handle_batch_pairs(
    State(scoring): State<Arc<ScoringService>>,
    JsonExtractor(request): JsonExtractor<PairBatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let rows = request.rows;
    let scored = tokio::task::spawn_blocking(move || scoring.score_pair_rows(&rows)).await??;
    tracing::debug!(rows = scored.len(), "Pair batch scored");
    Ok(Json(scored.into()))
}

/// Score region penalties
///
/// Output rows are `[penalty, null, null]`.
#[utoipa::path(
    post,
    path = "/api/batch/penalty",
    request_body = PenaltyBatchRequest,
    responses(
        (status = 200, description = "Rows scored", body = BatchResponse),
        (status = 400, description = "A row is off the grid or out of range"),
    ),
    tag = "Batch"
)]
pub async fn handle_batch_penalty(
    State(scoring): State<Arc<ScoringService>>,
    JsonExtractor(request): JsonExtractor<PenaltyBatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let rows = request.rows;
    let scored = tokio::task::spawn_blocking(move || scoring.score_penalty_rows(&rows)).await??;
    tracing::debug!(rows = scored.len(), "Penalty batch scored");
    Ok(Json(scored.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_padding_becomes_null() {
        let response = BatchResponse::from(vec![[0.9, f64::NAN, f64::NAN]]);
        assert_eq!(response.rows, vec![vec![Some(0.9), None, None]]);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"rows":[[0.9,null,null]]}"#
        );
    }
}
