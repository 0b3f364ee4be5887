use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::{BookingRecord, NewBooking, PriceTier, Seat};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Occupancy snapshot for one seat class, taken in a single operation so
/// the booked count and the total can never come from different states.
#[derive(Debug, Clone, Copy)]
pub struct ClassOccupancy {
    pub total: i64,
    pub booked: i64,
}

/// Persistence collaborator for seats, price tiers and the booking ledger.
/// The core logic depends only on these primitives (find / conditional
/// update / create / count) and never on backend query syntax.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All seats, sorted by (seat_class asc, id asc).
    async fn list_seats(&self) -> Result<Vec<Seat>, StoreError>;

    async fn find_seat(&self, seat_id: i64) -> Result<Option<Seat>, StoreError>;

    async fn class_occupancy(&self, seat_class: &str) -> Result<ClassOccupancy, StoreError>;

    /// Atomically transitions a seat from unbooked to booked. Returns
    /// false when the seat is missing or already booked; the caller never
    /// gets to observe an intermediate state.
    async fn mark_seat_booked(&self, seat_id: i64) -> Result<bool, StoreError>;

    async fn find_price_tier(&self, seat_class: &str) -> Result<Option<PriceTier>, StoreError>;

    async fn insert_booking(&self, booking: NewBooking) -> Result<BookingRecord, StoreError>;

    /// Records matching the given name OR the given phone.
    async fn find_bookings(
        &self,
        name: Option<&str>,
        phone: Option<i64>,
    ) -> Result<Vec<BookingRecord>, StoreError>;

    // Одноразовый импорт при старте
    async fn count_seats(&self) -> Result<i64, StoreError>;
    async fn insert_seats(&self, seats: &[Seat]) -> Result<u64, StoreError>;
    async fn count_price_tiers(&self) -> Result<i64, StoreError>;
    async fn insert_price_tiers(&self, tiers: &[PriceTier]) -> Result<u64, StoreError>;
}
