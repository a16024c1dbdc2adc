use crate::store::ClickStoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to get statistics: {0}")]
    Statistics(#[from] ClickStoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        error!("{}", self);

        let message = match self {
            ApiError::Statistics(_) => "Failed to get statistics",
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}
