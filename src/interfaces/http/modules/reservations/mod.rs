//! Reservation listing, lookup and creation endpoints

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
