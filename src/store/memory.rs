//! In-memory store for tests and local runs without a database.
//!
//! Holds the three collections behind one lock, so every operation sees a
//! single consistent state. Seed it through the same `insert_seats` /
//! `insert_price_tiers` primitives the import path uses.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use super::{BookingStore, ClassOccupancy, StoreError};
use crate::models::{BookingRecord, NewBooking, PriceTier, Seat};

#[derive(Default)]
struct Inner {
    seats: Vec<Seat>,
    tiers: Vec<PriceTier>,
    bookings: Vec<BookingRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_seats(&self) -> Result<Vec<Seat>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut seats = inner.seats.clone();
        seats.sort_by(|a, b| {
            a.seat_class
                .cmp(&b.seat_class)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(seats)
    }

    async fn find_seat(&self, seat_id: i64) -> Result<Option<Seat>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.seats.iter().find(|s| s.id == seat_id).cloned())
    }

    async fn class_occupancy(&self, seat_class: &str) -> Result<ClassOccupancy, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let in_class = inner.seats.iter().filter(|s| s.seat_class == seat_class);
        let mut total = 0;
        let mut booked = 0;
        for seat in in_class {
            total += 1;
            if seat.is_booked {
                booked += 1;
            }
        }
        Ok(ClassOccupancy { total, booked })
    }

    async fn mark_seat_booked(&self, seat_id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        match inner.seats.iter_mut().find(|s| s.id == seat_id) {
            Some(seat) if !seat.is_booked => {
                seat.is_booked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_price_tier(&self, seat_class: &str) -> Result<Option<PriceTier>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .tiers
            .iter()
            .find(|t| t.seat_class == seat_class)
            .cloned())
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<BookingRecord, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = BookingRecord {
            booking_id: booking.booking_id,
            seat_id: booking.seat_id,
            name: booking.name,
            phone: booking.phone,
            created_at: Utc::now().naive_utc(),
        };
        inner.bookings.push(record.clone());
        Ok(record)
    }

    async fn find_bookings(
        &self,
        name: Option<&str>,
        phone: Option<i64>,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .bookings
            .iter()
            .filter(|b| {
                name.is_some_and(|n| b.name == n) || phone.is_some_and(|p| b.phone == p)
            })
            .cloned()
            .collect())
    }

    async fn count_seats(&self) -> Result<i64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.seats.len() as i64)
    }

    async fn insert_seats(&self, seats: &[Seat]) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.seats.extend_from_slice(seats);
        Ok(seats.len() as u64)
    }

    async fn count_price_tiers(&self) -> Result<i64, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.tiers.len() as i64)
    }

    async fn insert_price_tiers(&self, tiers: &[PriceTier]) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.tiers.extend_from_slice(tiers);
        Ok(tiers.len() as u64)
    }
}
