use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Seat;
use crate::services::pricing::{self, PricedSeat};
use crate::store::BookingStore;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(list_seats))
        .route("/seats/{id}", get(get_seat_price))
}

// GET /seats - все места, отсортированные по классу и id
async fn list_seats(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Seat>>, ApiError> {
    let seats = state.store.list_seats().await?;
    Ok(Json(seats))
}

// GET /seats/{id} - место вместе с актуальной ценой
async fn get_seat_price(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<PricedSeat>, ApiError> {
    let priced = pricing::price_seat(&state.store, id).await?;
    Ok(Json(priced))
}
