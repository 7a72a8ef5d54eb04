//! Repository access for the domain layer
//!
//! `RepositoryProvider` gives unified access to the per-aggregate
//! repositories so services depend on one handle.

use super::cabin::CabinRepository;
use super::reservation::ReservationRepository;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let cabins = repos.cabins().find_all().await?;
///     let reservation = repos.reservations().find_by_id(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn cabins(&self) -> &dyn CabinRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
