use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Пустая строка в ценовом поле означает "уровень не задан"
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PriceTier {
    pub id: i64,
    pub seat_class: String,
    pub min_price: String,
    pub normal_price: String,
    pub max_price: String,
}
