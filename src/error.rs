use crate::models::PaletteError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use colorgorical_scores::{BatchError, TableError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid batch: {0}")]
    Batch(#[from] BatchError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Table error: {0}")]
    Tables(#[from] TableError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("weight {name} = {value} is outside 0..=1")]
    WeightOutOfRange { name: &'static str, value: f64 },
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Palette(_) | ApiError::Config(_) => StatusCode::BAD_REQUEST,
            ApiError::Batch(BatchError::RaggedInput { .. } | BatchError::InvalidColor { .. }) => {
                StatusCode::BAD_REQUEST
            }
            // output sizing is ours, missing name observations are a table gap
            ApiError::Batch(BatchError::OutputSize { .. } | BatchError::Score { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Tables(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
