//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod cabin_repository;
pub mod repository_provider;
pub mod reservation_repository;

pub use cabin_repository::SeaOrmCabinRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
