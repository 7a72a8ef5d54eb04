//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::cabin::CabinRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;

use super::cabin_repository::SeaOrmCabinRepository;
use super::reservation_repository::SeaOrmReservationRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let catalog = repos.cabins().find_all().await?;
/// let reservation = repos.reservations().find_by_id(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    cabins: SeaOrmCabinRepository,
    reservations: SeaOrmReservationRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cabins: SeaOrmCabinRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn cabins(&self) -> &dyn CabinRepository {
        &self.cabins
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}
