//! API Router with Swagger UI

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::BookingService;
use crate::domain::RepositoryProvider;

use super::error::ErrorBody;
use super::middleware::{auth_middleware, timeout_response_middleware, AuthState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{cabins, reservations, BookingState};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Shared API key sent as a bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        cabins::check_availability,
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::create_reservation,
    ),
    components(
        schemas(
            ErrorBody,
            health::HealthResponse,
            health::ComponentHealth,
            cabins::CabinDto,
            reservations::ReservationDto,
            reservations::CabinReservationDto,
            reservations::CreateReservationRequest,
            reservations::CreateReservationResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Cabins", description = "Cabin availability for a stay and party size"),
        (name = "Reservations", description = "Reservation listing, lookup and creation"),
    ),
    info(
        title = "Cabin Booking API",
        version = "1.0.0",
        description = "Availability matching and reservations for a fixed cabin catalog",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the running service.
#[derive(Clone)]
pub struct ApiContext {
    pub booking: Arc<BookingService>,
    pub repos: Arc<dyn RepositoryProvider>,
    pub auth: AuthState,
    pub prometheus: PrometheusHandle,
    pub request_timeout: Duration,
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let booking_state = BookingState {
        booking: ctx.booking.clone(),
    };

    // Booking routes (protected when an API key is configured).
    // The singular paths are kept as aliases of the plural ones.
    let api_routes = Router::new()
        .route("/cabins", get(cabins::check_availability))
        .route("/cabin", get(cabins::check_availability))
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/reservation", post(reservations::create_reservation))
        .route("/reservations/{id}", get(reservations::get_reservation))
        .route_layer(middleware::from_fn_with_state(ctx.auth.clone(), auth_middleware))
        .with_state(booking_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            repos: ctx.repos.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(prometheus_metrics))
        .with_state(MetricsState {
            handle: ctx.prometheus.clone(),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api", api_routes)
        // Middleware, innermost first
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(TimeoutLayer::new(ctx.request_timeout))
        .layer(middleware::from_fn(timeout_response_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
