//! Shared extractors for HTTP handlers

pub mod validated_json;

pub use validated_json::ValidatedJson;
