//! Cabin catalog repository interface

use std::collections::HashMap;

use async_trait::async_trait;

use super::model::Cabin;
use crate::domain::{DomainResult, StayInterval};

#[async_trait]
pub trait CabinRepository: Send + Sync {
    /// All cabins in catalog order (ascending id)
    async fn find_all(&self) -> DomainResult<Vec<Cabin>>;

    /// Cabins with the given ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Cabin>>;

    /// Booked stays overlapping `range`, grouped by cabin id
    async fn booked_intervals(
        &self,
        range: &StayInterval,
    ) -> DomainResult<HashMap<i32, Vec<StayInterval>>>;

    /// Number of cabins in the catalog
    async fn count(&self) -> DomainResult<u64>;

    /// Add a cabin to the catalog
    async fn insert(&self, name: &str, capacity: i32) -> DomainResult<Cabin>;

    /// Insert all of `cabins` in one transaction when the catalog is empty.
    /// Returns the inserted cabins; empty when the catalog already had rows.
    async fn seed_if_empty(&self, cabins: &[(String, i32)]) -> DomainResult<Vec<Cabin>>;
}
