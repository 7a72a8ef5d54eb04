//! Database entities module

pub mod cabin;
pub mod cabin_reservation;
pub mod reservation;

pub use cabin::Entity as Cabin;
pub use cabin_reservation::Entity as CabinReservation;
pub use reservation::Entity as Reservation;
