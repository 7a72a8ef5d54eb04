//! Bearer API key authentication middleware for Axum
//!
//! The configured key is kept only as a SHA-256 digest; presented tokens are
//! hashed and compared in constant time.
//!
//! Also holds the timeout responder that gives deadline failures the same
//! JSON error body as every other failure.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};
use tracing::warn;

use super::error::ApiError;

type KeyDigest = [u8; 32];

fn digest(value: &str) -> KeyDigest {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}

fn constant_time_eq(a: &KeyDigest, b: &KeyDigest) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Authentication state holding the expected key digest.
///
/// `None` leaves the API open.
#[derive(Clone, Default)]
pub struct AuthState {
    expected: Option<KeyDigest>,
}

impl AuthState {
    /// Require `Authorization: Bearer <api_key>`; a blank key disables auth.
    pub fn new(api_key: Option<&str>) -> Self {
        Self {
            expected: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(digest),
        }
    }

    pub fn open() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.expected.is_some()
    }

    fn check(&self, auth_header: Option<&str>) -> Result<(), ApiError> {
        let Some(expected) = &self.expected else {
            return Ok(());
        };

        let token = auth_header
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(ApiError::MissingApiKey)?;

        if constant_time_eq(&digest(token), expected) {
            Ok(())
        } else {
            Err(ApiError::InvalidApiKey)
        }
    }
}

/// API key authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_state.check(auth_header) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            warn!(path = %request.uri().path(), "Rejected request: {}", e);
            e.into_response()
        }
    }
}

/// Turn the empty 408 produced by `TimeoutLayer` into an `ApiError` body.
///
/// Must sit outside the timeout layer.
pub async fn timeout_response_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        warn!(%path, "Request exceeded its deadline");
        return ApiError::RequestTimeout.into_response();
    }
    response
}
