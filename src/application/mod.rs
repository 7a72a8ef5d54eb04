//! Application layer - booking rules and use cases
//!
//! - `availability`: catalog filtering against booked stays
//! - `allocation`: direct-fit and greedy combination policies
//! - `period`: month / day windows for reservation listings
//! - `services`: `BookingService` tying the rules to the repositories

pub mod allocation;
pub mod availability;
pub mod period;
pub mod services;

pub use allocation::{AllocationPolicy, CapacityAllocator};
pub use availability::find_available;
pub use period::{filter_reservations, DayField, PeriodQuery};
pub use services::{BookingService, BookingSettings};
