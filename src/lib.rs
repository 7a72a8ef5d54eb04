//! # Cabin Booking Service
//!
//! Reservation backend for a small site of rental cabins: availability
//! search, group allocation, reservation listings and creation.
//!
//! ## Architecture
//!
//! - **domain**: cabins, reservations, stay intervals and repository traits
//! - **application**: availability, allocation and period rules plus `BookingService`
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: startup, seeding and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::{create_api_router, ApiContext};
