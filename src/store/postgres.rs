use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::{BookingStore, ClassOccupancy, StoreError};
use crate::models::{BookingRecord, NewBooking, PriceTier, Seat};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        info!("Migrations completed");
        Ok(())
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_seats(&self) -> Result<Vec<Seat>, StoreError> {
        let seats = sqlx::query_as::<_, Seat>(
            "SELECT id, seat_identifier, seat_class, is_booked
             FROM seats
             ORDER BY seat_class, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn find_seat(&self, seat_id: i64) -> Result<Option<Seat>, StoreError> {
        let seat = sqlx::query_as::<_, Seat>(
            "SELECT id, seat_identifier, seat_class, is_booked
             FROM seats
             WHERE id = $1",
        )
        .bind(seat_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(seat)
    }

    async fn class_occupancy(&self, seat_class: &str) -> Result<ClassOccupancy, StoreError> {
        // Оба счетчика одним запросом - один консистентный снимок
        let (total, booked): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_booked)
             FROM seats
             WHERE seat_class = $1",
        )
        .bind(seat_class)
        .fetch_one(&self.pool)
        .await?;
        Ok(ClassOccupancy { total, booked })
    }

    async fn mark_seat_booked(&self, seat_id: i64) -> Result<bool, StoreError> {
        // Условный UPDATE вместо read-then-write: переход видит ровно один запрос
        let result = sqlx::query(
            "UPDATE seats SET is_booked = TRUE WHERE id = $1 AND is_booked = FALSE",
        )
        .bind(seat_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_price_tier(&self, seat_class: &str) -> Result<Option<PriceTier>, StoreError> {
        let tier = sqlx::query_as::<_, PriceTier>(
            "SELECT id, seat_class, min_price, normal_price, max_price
             FROM seat_prices
             WHERE seat_class = $1",
        )
        .bind(seat_class)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tier)
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<BookingRecord, StoreError> {
        let record = sqlx::query_as::<_, BookingRecord>(
            "INSERT INTO bookings (booking_id, seat_id, name, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING booking_id, seat_id, name, phone, created_at",
        )
        .bind(&booking.booking_id)
        .bind(booking.seat_id)
        .bind(&booking.name)
        .bind(booking.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_bookings(
        &self,
        name: Option<&str>,
        phone: Option<i64>,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        // NULL не матчится через "=", поэтому отсутствующий параметр
        // просто выключает свою половину OR
        let bookings = sqlx::query_as::<_, BookingRecord>(
            "SELECT booking_id, seat_id, name, phone, created_at
             FROM bookings
             WHERE name = $1 OR phone = $2
             ORDER BY created_at",
        )
        .bind(name)
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn count_seats(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seats")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_seats(&self, seats: &[Seat]) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for seat in seats {
            let result = sqlx::query(
                "INSERT INTO seats (id, seat_identifier, seat_class, is_booked)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(seat.id)
            .bind(&seat.seat_identifier)
            .bind(&seat.seat_class)
            .bind(seat.is_booked)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    async fn count_price_tiers(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seat_prices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_price_tiers(&self, tiers: &[PriceTier]) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for tier in tiers {
            let result = sqlx::query(
                "INSERT INTO seat_prices (id, seat_class, min_price, normal_price, max_price)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(tier.id)
            .bind(&tier.seat_class)
            .bind(&tier.min_price)
            .bind(&tier.normal_price)
            .bind(&tier.max_price)
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}
