use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::BookingRecord;
use crate::services::booking::{self, BookingConfirmation, BookingRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/booking", post(submit_bookings))
        .route("/bookings", get(find_bookings))
}

// POST /booking - пачка заявок на бронирование
async fn submit_bookings(
    State(state): State<Arc<AppState>>,
    Json(requests): Json<Vec<BookingRequest>>,
) -> Result<Json<Vec<BookingConfirmation>>, ApiError> {
    let confirmations = booking::submit_bookings(&state.store, &requests).await?;
    Ok(Json(confirmations))
}

#[derive(Debug, Deserialize)]
struct BookingsQuery {
    name: Option<String>,
    phone: Option<i64>,
}

// GET /bookings?name=&phone= - поиск по имени ИЛИ телефону
async fn find_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingRecord>>, ApiError> {
    let bookings =
        booking::find_bookings(&state.store, params.name.as_deref(), params.phone).await?;
    Ok(Json(bookings))
}
