use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::services::places_service::PlacesError;

/// Errors surfaced by the HTTP handlers.
///
/// Every variant answers 400 with the raw message as the body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Places(#[from] PlacesError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Request failed: {}", self);
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
