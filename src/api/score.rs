use axum::{extract::State, response::Json, Json as JsonExtractor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, ColorInput, Palette, PaletteReport, WeightOverrides};
use crate::services::ScoringService;

/// Request body for palette scoring
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScoreRequest {
    /// Colors as `[L, a, b]` triples or sRGB strings (`#rrggbb`, `#rgb`, `rgb(r,g,b)`)
    #[schema(value_type = Vec<Object>)]
    pub palette: Vec<ColorInput>,
    /// Optional palette name, echoed in the response
    #[serde(default)]
    pub name: Option<String>,
    /// Per-weight overrides; omitted weights keep their configured values
    #[serde(default)]
    pub weights: Option<WeightOverrides>,
}

/// Scored palette
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreResponse {
    pub name: String,
    /// Millisecond timestamp identifying this report
    pub uniq_id: String,
    #[serde(flatten)]
    pub report: PaletteReport,
}

/// Score a palette
///
/// Every color is snapped to the 5-unit Lab grid, then all unordered pairs
/// are scored. Minima are weighted with the configured weights, with any
/// weights given in the request taking precedence.
#[utoipa::path(
    post,
    path = "/api/score",
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Palette scored", body = ScoreResponse),
        (status = 400, description = "Invalid color or weights"),
        (status = 500, description = "Score tables cannot score this palette"),
    ),
    tag = "Scoring"
)]
pub async fn handle_score(
    State(config): State<Arc<AppConfig>>,
    State(scoring): State<Arc<ScoringService>>,
    JsonExtractor(request): JsonExtractor<ScoreRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let weights = request.weights.unwrap_or_default().apply(config.weights);
    weights.validate()?;
    let palette = Palette::from_inputs(&request.palette)?;

    let report =
        tokio::task::spawn_blocking(move || scoring.score_palette(&palette, &weights)).await??;

    let uniq_id = chrono::Utc::now().timestamp_millis().to_string();
    tracing::info!(
        uniq_id = %uniq_id,
        colors = report.colors.len(),
        min_de = report.min_scores.de,
        "Palette scored"
    );

    Ok(Json(ScoreResponse {
        name: request.name.unwrap_or_else(|| "???".to_string()),
        uniq_id,
        report,
    }))
}
