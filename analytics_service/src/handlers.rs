use crate::SERVICE_NAME;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::CodeStats;
use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use shared::HealthResponse;

#[derive(Debug, Serialize, Deserialize)]
pub struct AllStatsResponse {
    pub stats: Vec<CodeStats>,
    pub total: usize,
}

pub async fn handle_stats(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<CodeStats>, ApiError> {
    let stats = state.store.stats_for(&short_code).await?;
    Ok(Json(stats))
}

pub async fn handle_all_stats(
    State(state): State<AppState>,
) -> Result<Json<AllStatsResponse>, ApiError> {
    let stats = state.store.all_stats().await?;
    let total = stats.len();
    Ok(Json(AllStatsResponse { stats, total }))
}

pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let healthy = tokio::time::timeout(state.health_timeout, state.store.ping())
        .await
        .unwrap_or(false);
    Json(HealthResponse::new(SERVICE_NAME, healthy))
}
