//! HTTP feature modules

use std::sync::Arc;

use crate::application::BookingService;

pub mod cabins;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod reservations;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingState {
    pub booking: Arc<BookingService>,
}
