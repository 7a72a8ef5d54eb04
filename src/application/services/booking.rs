//! Booking business logic service
//!
//! Orchestrates the catalog and reservation repositories around the pure
//! availability, allocation and period-query functions.

use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use tracing::{debug, info, warn};

use crate::application::allocation::{AllocationPolicy, CapacityAllocator, DEFAULT_GROUP_THRESHOLD};
use crate::application::availability::find_available;
use crate::application::period::PeriodQuery;
use crate::domain::{
    Cabin, DomainError, DomainResult, NewReservation, RepositoryProvider, Reservation,
    StayInterval,
};

/// Tunables for the booking rules.
#[derive(Debug, Clone, Copy)]
pub struct BookingSettings {
    /// Party size above which cabins are combined
    pub group_threshold: i32,
    /// Offset used for calendar months and days
    pub utc_offset: FixedOffset,
    /// Re-check overlaps inside the write transaction
    pub reject_overlapping_writes: bool,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            group_threshold: DEFAULT_GROUP_THRESHOLD,
            utc_offset: Utc.fix(),
            reject_overlapping_writes: true,
        }
    }
}

/// Service for availability, listing and reservation creation
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    allocator: CapacityAllocator,
    settings: BookingSettings,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: BookingSettings) -> Self {
        Self {
            repos,
            allocator: CapacityAllocator::new(settings.group_threshold),
            settings,
        }
    }

    pub fn settings(&self) -> &BookingSettings {
        &self.settings
    }

    /// Cabins offered for `party_size` guests over `stay`.
    ///
    /// An empty list means nothing fits; that is not an error.
    pub async fn check_availability(
        &self,
        stay: &StayInterval,
        party_size: i32,
    ) -> DomainResult<Vec<Cabin>> {
        let cabins = self.repos.cabins().find_all().await?;
        let booked = self.repos.cabins().booked_intervals(stay).await?;
        let available = find_available(stay, &cabins, &booked);
        let policy = self.allocator.policy_for(party_size);
        let offered = self.allocator.allocate(&available, party_size);

        debug!(
            catalog = cabins.len(),
            available = available.len(),
            offered = offered.len(),
            party_size,
            ?policy,
            "Availability computed"
        );

        let policy_label = match policy {
            AllocationPolicy::DirectFit => "direct_fit",
            AllocationPolicy::Combination => "combination",
        };
        let outcome = if offered.is_empty() { "none" } else { "offered" };
        metrics::counter!("availability_queries_total", "policy" => policy_label, "outcome" => outcome)
            .increment(1);

        Ok(offered)
    }

    /// Reservations within the period named by `query`, ordered by id.
    pub async fn list_reservations(&self, query: &PeriodQuery) -> DomainResult<Vec<Reservation>> {
        let window = query
            .window(self.settings.utc_offset)
            .ok_or_else(|| DomainError::Validation(format!("{:?} is not a valid period", query)))?;

        let candidates = self.repos.reservations().find_touching(&window).await?;
        Ok(candidates
            .into_iter()
            .filter(|r| query.matches(r, &window))
            .collect())
    }

    /// Reservation by id, with its cabin stays
    pub async fn get_reservation(&self, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Validate and persist a reservation; returns its id.
    pub async fn create_reservation(&self, reservation: NewReservation) -> DomainResult<i32> {
        reservation.validate()?;

        let known = self.repos.cabins().find_by_ids(&reservation.cabin_ids).await?;
        if known.len() != reservation.cabin_ids.len() {
            let mut unknown: Vec<String> = reservation
                .cabin_ids
                .iter()
                .filter(|id| !known.iter().any(|c| c.id == **id))
                .map(|id| id.to_string())
                .collect();
            unknown.sort();
            return Err(DomainError::Validation(format!(
                "unknown cabin id(s): {}",
                unknown.join(", ")
            )));
        }

        let client_name = reservation.client_name.clone();
        let cabin_ids = reservation.cabin_ids.clone();

        let result = self
            .repos
            .reservations()
            .create(reservation, self.settings.reject_overlapping_writes)
            .await;

        match &result {
            Ok(id) => {
                info!(
                    reservation_id = id,
                    client = %client_name,
                    cabins = ?cabin_ids,
                    "Reservation created"
                );
                metrics::counter!("reservations_created_total").increment(1);
            }
            Err(DomainError::Conflict(reason)) => {
                warn!(cabins = ?cabin_ids, %reason, "Reservation rejected: overlapping stay");
                metrics::counter!("reservation_conflicts_total").increment(1);
            }
            Err(_) => {}
        }

        result
    }
}

// ── Tests ──────────────────────────────────────────────────────
