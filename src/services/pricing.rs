use serde::Serialize;

use crate::error::ApiError;
use crate::models::{PriceTier, Seat};
use crate::store::{BookingStore, ClassOccupancy};

/// Seat attributes merged with the effective price for the current
/// occupancy of its class.
#[derive(Debug, Clone, Serialize)]
pub struct PricedSeat {
    #[serde(flatten)]
    pub seat: Seat,
    pub price: String,
}

/// Computes the effective price of one seat. Read-only: occupancy is
/// re-counted from the live store on every call.
pub async fn price_seat(store: &dyn BookingStore, seat_id: i64) -> Result<PricedSeat, ApiError> {
    let seat = store
        .find_seat(seat_id)
        .await?
        .ok_or(ApiError::SeatNotFound(seat_id))?;

    // Снимок занятости берем до выбора тарифа, одним обращением к стору
    let occupancy = store.class_occupancy(&seat.seat_class).await?;
    let percentage = occupancy_percent(occupancy)
        .ok_or_else(|| ApiError::EmptySeatClass(seat.seat_class.clone()))?;

    let tier = store
        .find_price_tier(&seat.seat_class)
        .await?
        .ok_or_else(|| ApiError::PriceTierNotFound(seat.seat_class.clone()))?;

    let price = select_tier_price(percentage, &tier).to_string();
    Ok(PricedSeat { seat, price })
}

/// Booked share of a class in percent. An empty class has no occupancy,
/// not a NaN one.
fn occupancy_percent(occupancy: ClassOccupancy) -> Option<f64> {
    if occupancy.total == 0 {
        return None;
    }
    Some(occupancy.booked as f64 / occupancy.total as f64 * 100.0)
}

/// Occupancy bands: below 40% the class sells at the minimum tier, between
/// 40% and 60% (both ends inclusive) at the normal tier, above 60% at the
/// maximum tier. An unset tier value falls back to its neighbour.
pub fn select_tier_price(percentage: f64, tier: &PriceTier) -> &str {
    if percentage < 40.0 {
        non_empty(&tier.min_price).unwrap_or(&tier.normal_price)
    } else if percentage <= 60.0 {
        non_empty(&tier.normal_price).unwrap_or(&tier.max_price)
    } else {
        non_empty(&tier.max_price).unwrap_or(&tier.normal_price)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
