//! Reservation aggregate
//!
//! Contains the Reservation entity, its per-cabin stay records,
//! the write model, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{CabinReservation, NewReservation, Reservation};
pub use repository::ReservationRepository;
