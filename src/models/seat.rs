use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub id: i64,
    pub seat_identifier: String,
    pub seat_class: String,
    #[serde(default)]
    pub is_booked: bool,
}
