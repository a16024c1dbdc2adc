use crate::handlers::{handle_health, handle_redirect};
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
        .route("/{short_code}", get(handle_redirect))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
