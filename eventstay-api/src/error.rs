use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventstay_core::AccessError;

/// Handler failure. Responses carry the status code only.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    PaymentRequired(String),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        tracing::debug!("Request failed with {}: {}", status, message);
        status.into_response()
    }
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotFound(_) => AppError::NotFound(err.to_string()),
            AccessError::PaymentRequired(_) => AppError::PaymentRequired(err.to_string()),
            AccessError::InvalidHotelId(_) => AppError::BadRequest(err.to_string()),
            // Unclassified failures are reported to the client as a bad request.
            AccessError::Store(_) => {
                tracing::error!("{}", err);
                AppError::BadRequest("Store lookup failed".to_string())
            }
        }
    }
}
