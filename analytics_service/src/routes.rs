use crate::handlers::{handle_all_stats, handle_health, handle_stats};
use crate::state::AppState;
use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/stats", get(handle_all_stats))
        .route("/stats/{short_code}", get(handle_stats))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
