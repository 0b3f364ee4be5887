//! End-to-end scenarios over the service layer, backed by the in-memory
//! store so no database is needed.

use seat_booking::models::{PriceTier, Seat};
use seat_booking::services::booking::{self, BookingRequest};
use seat_booking::services::pricing;
use seat_booking::store::{BookingStore, MemoryStore};

fn seat(id: i64, seat_class: &str) -> Seat {
    Seat {
        id,
        seat_identifier: format!("{}-{}", seat_class.to_uppercase(), id),
        seat_class: seat_class.to_string(),
        is_booked: false,
    }
}

fn tier(seat_class: &str, min: &str, normal: &str, max: &str) -> PriceTier {
    PriceTier {
        id: 1,
        seat_class: seat_class.to_string(),
        min_price: min.to_string(),
        normal_price: normal.to_string(),
        max_price: max.to_string(),
    }
}

fn request(seat_id: i64, name: &str, phone: i64) -> BookingRequest {
    BookingRequest {
        seat_id,
        name: name.to_string(),
        phone,
    }
}

async fn class_of_ten(min: &str, normal: &str, max: &str) -> MemoryStore {
    let store = MemoryStore::new();
    let seats: Vec<Seat> = (1..=10).map(|id| seat(id, "economy")).collect();
    store.insert_seats(&seats).await.unwrap();
    store
        .insert_price_tiers(&[tier("economy", min, normal, max)])
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn class_at_30_percent_prices_at_min() {
    let store = class_of_ten("100", "200", "400").await;
    for id in 1..=3 {
        assert!(store.mark_seat_booked(id).await.unwrap());
    }

    let priced = pricing::price_seat(&store, 5).await.unwrap();
    assert_eq!(priced.price, "100");
}

#[tokio::test]
async fn class_at_30_percent_without_min_prices_at_normal() {
    let store = class_of_ten("", "200", "400").await;
    for id in 1..=3 {
        assert!(store.mark_seat_booked(id).await.unwrap());
    }

    let priced = pricing::price_seat(&store, 5).await.unwrap();
    assert_eq!(priced.price, "200");
}

#[tokio::test]
async fn booking_moves_the_class_into_the_next_band() {
    // 3 из 10 заняты; бронь четвертого дает 40% и средний диапазон,
    // поэтому цена в подтверждении уже normal
    let store = class_of_ten("100", "200", "400").await;
    for id in 1..=3 {
        assert!(store.mark_seat_booked(id).await.unwrap());
    }

    let confirmations = booking::submit_bookings(&store, &[request(4, "Alice", 111)])
        .await
        .unwrap();
    assert_eq!(confirmations[0].price, "200");
}

#[tokio::test]
async fn batch_of_two_books_both_seats() {
    let store = class_of_ten("100", "200", "400").await;

    let confirmations = booking::submit_bookings(
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
async fn duplicate_seat_in_a_batch_conflicts_but_keeps_the_first() {
    let store = class_of_ten("100", "200", "400").await;

    let err = booking::submit_bookings(
        &store,
        &[request(1, "Alice", 111), request(1, "Bob", 222)],
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("seatId 1"));
    assert!(store.find_seat(1).await.unwrap().unwrap().is_booked);
    let alice = booking::find_bookings(&store, Some("Alice"), None)
        .await
        .unwrap();
    assert_eq!(alice.len(), 1);
    let bob = booking::find_bookings(&store, Some("Bob"), None)
        .await
        .unwrap();
    assert!(bob.is_empty());
}

#[tokio::test]
async fn seats_listing_is_sorted_by_class_then_id() {
    let store = MemoryStore::new();
    store
        .insert_seats(&[seat(20, "premium"), seat(2, "economy"), seat(1, "economy")])
        .await
        .unwrap();

    let seats = store.list_seats().await.unwrap();
    let keys: Vec<(String, i64)> = seats
        .into_iter()
        .map(|s| (s.seat_class, s.id))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("economy".to_string(), 1),
            ("economy".to_string(), 2),
            ("premium".to_string(), 20),
        ]
    );
}
