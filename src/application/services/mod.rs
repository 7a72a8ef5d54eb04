//! Application services - business logic layer

pub mod booking;

pub use booking::{BookingService, BookingSettings};
