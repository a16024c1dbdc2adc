use crate::store::StoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedirectError {
    #[error("Short code not found")]
    NotFound,

    #[error("Mapping store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl IntoResponse for RedirectError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            RedirectError::NotFound => (StatusCode::NOT_FOUND, "Short URL not found"),
            RedirectError::StoreUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, message).into_response()
    }
}
