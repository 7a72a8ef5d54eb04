//! HTTP REST API interfaces
//!
//! - `middleware`: bearer API key authentication
//! - `modules`: handlers and DTOs per resource, request-id and metrics layers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod error;
pub mod middleware;
pub mod modules;
pub mod router;

pub use error::{ApiError, ErrorBody};
pub use middleware::AuthState;
pub use router::{create_api_router, ApiContext, ApiDoc};
