use crate::SERVICE_NAME;
use crate::client_addr::client_addr;
use crate::error::RedirectError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use shared::{ClickEvent, HealthResponse};
use std::net::SocketAddr;
use tracing::{info, warn};

/// `GET /{shortCode}`: 302 to the destination. The click is queued for
/// publication and never awaited.
pub async fn handle_redirect(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Result<Response, RedirectError> {
    let destination = state.resolver.resolve(&short_code).await?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let ip = client_addr(&headers, peer);
    state.publisher.publish(ClickEvent::new(short_code.as_str(), user_agent, ip));

    info!("Redirecting `{}` to {}", short_code, destination);

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]).into_response())
}

pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    if !state.publisher.is_running() {
        warn!("Click worker is not running, clicks are being dropped");
    }

    let healthy = state.resolver.is_healthy().await;
    Json(HealthResponse::new(SERVICE_NAME, healthy))
}
