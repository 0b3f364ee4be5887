pub mod booking;
pub mod price;
pub mod seat;

pub use booking::{BookingRecord, NewBooking};
pub use price::PriceTier;
pub use seat::Seat;
