//! Cabin catalog
//!
//! Contains the Cabin entity and the catalog repository interface.

pub mod model;
pub mod repository;

pub use model::Cabin;
pub use repository::CabinRepository;
