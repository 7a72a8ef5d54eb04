//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation};
use crate::domain::{DomainResult, StayInterval};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a reservation and one stay record per cabin in a single
    /// transaction; returns the new reservation id.
    ///
    /// With `reject_overlaps`, existing stays of the requested cabins are
    /// re-checked inside the transaction and an overlap aborts the write
    /// with `DomainError::Conflict`.
    async fn create(&self, reservation: NewReservation, reject_overlaps: bool)
        -> DomainResult<i32>;

    /// Find reservation by ID, with its cabin stays
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Reservations having at least one stay that touches `window`
    /// (shared endpoints included), ordered by id.
    async fn find_touching(&self, window: &StayInterval) -> DomainResult<Vec<Reservation>>;
}
