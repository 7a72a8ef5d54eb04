pub mod cabin;
pub mod repositories;
pub mod reservation;
pub mod stay;

// Re-export commonly used types
pub use cabin::{Cabin, CabinRepository};
pub use repositories::RepositoryProvider;
pub use reservation::{CabinReservation, NewReservation, Reservation, ReservationRepository};
pub use stay::{overlaps, StayInterval};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::{DomainError, DomainResult};
