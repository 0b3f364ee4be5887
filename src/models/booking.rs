use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_id: String,
    pub seat_id: i64,
    pub name: String,
    pub phone: i64,
    pub created_at: NaiveDateTime,
}

/// Insert payload for the ledger; `created_at` is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_id: String,
    pub seat_id: i64,
    pub name: String,
    pub phone: i64,
}
