use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{BookingRecord, NewBooking};
use crate::store::BookingStore;

use super::pricing;

/// One line item of a booking batch.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(rename = "seatId")]
    pub seat_id: i64,
    pub name: String,
    #[serde(rename = "number")]
    pub phone: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: String,
    pub price: String,
}

/// Processes a booking batch strictly sequentially: each line item runs to
/// completion before the next starts, so the response order matches the
/// request order and the availability check cannot race itself.
///
/// A conflict or an unknown seat aborts the whole batch; line items that
/// already went through stay committed and are not rolled back.
pub async fn submit_bookings(
    store: &dyn BookingStore,
    requests: &[BookingRequest],
) -> Result<Vec<BookingConfirmation>, ApiError> {
    let mut confirmations = Vec::with_capacity(requests.len());

    for request in requests {
        store
            .find_seat(request.seat_id)
            .await?
            .ok_or(ApiError::SeatNotFound(request.seat_id))?;

        // Атомарный переход false -> true; false здесь значит,
        // что место успели занять
        if !store.mark_seat_booked(request.seat_id).await? {
            return Err(ApiError::SeatAlreadyBooked(request.seat_id));
        }

        // Цена считается после перехода: свежезанятое место уже входит
        // в занятость своего класса
        let priced = pricing::price_seat(store, request.seat_id).await?;

        let booking_id = Uuid::new_v4().to_string();
        store
            .insert_booking(NewBooking {
                booking_id: booking_id.clone(),
                seat_id: request.seat_id,
                name: request.name.clone(),
                phone: request.phone,
            })
            .await?;

        confirmations.push(BookingConfirmation {
            booking_id,
            price: priced.price,
        });
    }

    Ok(confirmations)
}

/// Ledger lookup by name OR phone. At least one identifier is required.
pub async fn find_bookings(
    store: &dyn BookingStore,
    name: Option<&str>,
    phone: Option<i64>,
) -> Result<Vec<BookingRecord>, ApiError> {
    if name.is_none() && phone.is_none() {
        return Err(ApiError::Validation(
            "No user identifier provided".to_string(),
        ));
    }
    Ok(store.find_bookings(name, phone).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceTier, Seat};
    use crate::store::MemoryStore;

    fn seat(id: i64, is_booked: bool) -> Seat {
        Seat {
            id,
            seat_identifier: format!("A{}", id),
            seat_class: "economy".to_string(),
            is_booked,
        }
    }

    fn request(seat_id: i64, name: &str, phone: i64) -> BookingRequest {
        BookingRequest {
            seat_id,
            name: name.to_string(),
            phone,
        }
    }

    async fn store_with_seats(seats: &[Seat]) -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_seats(seats).await.unwrap();
        store
            .insert_price_tiers(&[PriceTier {
                id: 1,
                seat_class: "economy".to_string(),
                min_price: "100".to_string(),
                normal_price: "200".to_string(),
                max_price: "400".to_string(),
            }])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn books_two_distinct_seats_with_distinct_ids() {
        let store = store_with_seats(&[seat(1, false), seat(2, false)]).await;

        let confirmations = submit_bookings(
            &store,
            &[request(1, "Alice", 111), request(2, "Bob", 222)],
        )
        .await
        .unwrap();

        assert_eq!(confirmations.len(), 2);
        assert_ne!(confirmations[0].booking_id, confirmations[1].booking_id);
        assert!(store.find_seat(1).await.unwrap().unwrap().is_booked);
        assert!(store.find_seat(2).await.unwrap().unwrap().is_booked);
    }

    #[tokio::test]
    async fn already_booked_seat_conflicts_and_leaves_no_record() {
        let store = store_with_seats(&[seat(7, true)]).await;

        let err = submit_bookings(&store, &[request(7, "Alice", 111)])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::SeatAlreadyBooked(7)));
        let records = store.find_bookings(Some("Alice"), None).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn second_attempt_on_a_freshly_booked_seat_fails() {
        let store = store_with_seats(&[seat(1, false)]).await;

        submit_bookings(&store, &[request(1, "Alice", 111)])
            .await
            .unwrap();
        let err = submit_bookings(&store, &[request(1, "Bob", 222)])
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::SeatAlreadyBooked(1)));
        // ровно одна запись в журнале
        let records = store.find_bookings(Some("Alice"), Some(222)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Alice");
    }

    #[tokio::test]
    async fn same_seat_twice_in_one_batch_keeps_the_first_booking() {
        let store = store_with_seats(&[seat(1, false), seat(2, false)]).await;

        let err = submit_bookings(
            &store,
            &[request(1, "Alice", 111), request(1, "Bob", 222)],
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::SeatAlreadyBooked(1)));
        // первая заявка пачки уже записана и не откатывается
        assert!(store.find_seat(1).await.unwrap().unwrap().is_booked);
        let alice = store.find_bookings(Some("Alice"), None).await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].seat_id, 1);
        let bob = store.find_bookings(Some("Bob"), None).await.unwrap();
        assert!(bob.is_empty());
    }

    #[tokio::test]
    async fn unknown_seat_aborts_the_batch_with_not_found() {
        let store = store_with_seats(&[seat(1, false)]).await;

        let err = submit_bookings(&store, &[request(42, "Alice", 111)])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::SeatNotFound(42)));
    }

    #[tokio::test]
    async fn lookup_matches_by_name_or_phone_not_both() {
        let store = store_with_seats(&[seat(1, false), seat(2, false)]).await;
        submit_bookings(
            &store,
            &[request(1, "Alice", 111), request(2, "Bob", 222)],
        )
        .await
        .unwrap();

        // имя от одной брони, телефон от другой: OR должен вернуть обе
        let records = find_bookings(&store, Some("Alice"), Some(222)).await.unwrap();
        assert_eq!(records.len(), 2);

        let by_name = find_bookings(&store, Some("Alice"), None).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].phone, 111);

        let by_phone = find_bookings(&store, None, Some(222)).await.unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Bob");
    }

    #[tokio::test]
    async fn lookup_without_any_identifier_is_rejected() {
        let store = MemoryStore::new();
        let err = find_bookings(&store, None, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
