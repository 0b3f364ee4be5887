use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the pricing engine and the booking orchestrator.
/// The HTTP boundary maps each kind to a status code; the core only
/// propagates them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("seat with seatId {0} not found")]
    SeatNotFound(i64),
    #[error("no price tier configured for seat class {0}")]
    PriceTierNotFound(String),
    #[error("seat with seatId {0} is already booked")]
    SeatAlreadyBooked(i64),
    #[error("seat class {0} has no seats")]
    EmptySeatClass(String),
    #[error("{0}")]
    Validation(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::SeatNotFound(_) | ApiError::PriceTierNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SeatAlreadyBooked(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::EmptySeatClass(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Детали ошибок хранилища не отдаем наружу, только в лог
        let message = match &self {
            ApiError::Store(e) => {
                tracing::error!("store failure: {:?}", e);
                "An error occurred while accessing the store".to_string()
            }
            ApiError::EmptySeatClass(_) => {
                tracing::error!("pricing failure: {}", self);
                self.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
