//! Reservation domain entity

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult, StayInterval};

/// One cabin's stay within a reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct CabinReservation {
    pub id: i32,
    pub cabin_id: i32,
    pub reservation_id: i32,
    pub stay: StayInterval,
}

/// A booking of one or more cabins for a client.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub client_name: String,
    pub visitor_quantity: i32,
    /// Caller-supplied total price
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub cabin_reservations: Vec<CabinReservation>,
}

impl Reservation {
    /// Earliest check-in across the booked cabins
    pub fn check_in(&self) -> Option<DateTime<Utc>> {
        self.cabin_reservations.iter().map(|cr| cr.stay.start).min()
    }

    /// Latest check-out across the booked cabins
    pub fn check_out(&self) -> Option<DateTime<Utc>> {
        self.cabin_reservations.iter().map(|cr| cr.stay.end).max()
    }

    pub fn cabin_ids(&self) -> Vec<i32> {
        self.cabin_reservations.iter().map(|cr| cr.cabin_id).collect()
    }
}

/// Write model for creating a reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub client_name: String,
    pub visitor_quantity: i32,
    pub price: Decimal,
    pub cabin_ids: Vec<i32>,
    pub stay: StayInterval,
}

impl NewReservation {
    /// Check the invariants the write path relies on.
    pub fn validate(&self) -> DomainResult<()> {
        if self.client_name.trim().is_empty() {
            return Err(DomainError::Validation("clientName must not be empty".into()));
        }
        if self.visitor_quantity < 1 {
            return Err(DomainError::Validation(
                "visitorQuantity must be at least 1".into(),
            ));
        }
        if self.price.is_sign_negative() {
            return Err(DomainError::Validation("price must not be negative".into()));
        }
        if self.stay.is_empty() {
            return Err(DomainError::Validation("dateOut must be after dateIn".into()));
        }
        if self.cabin_ids.is_empty() {
            return Err(DomainError::Validation("cabins must not be empty".into()));
        }

        let mut seen = HashSet::with_capacity(self.cabin_ids.len());
        if let Some(dup) = self.cabin_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(DomainError::Validation(format!(
                "cabin {} is listed more than once",
                dup
            )));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
    }

    fn sample_new() -> NewReservation {
        NewReservation {
            client_name: "Ada".into(),
            visitor_quantity: 4,
            price: Decimal::new(45000, 2),
            cabin_ids: vec![1, 2],
            stay: StayInterval::new(at(6, 1), at(6, 5)),
        }
    }

    #[test]
    fn valid_new_reservation_passes() {
        assert!(sample_new().validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_cabins() {
        let mut r = sample_new();
        r.cabin_ids = vec![1, 2, 1];
        let err = r.validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("cabin 1")));
    }

    #[test]
    fn rejects_empty_or_reversed_stay() {
        let mut r = sample_new();
        r.stay = StayInterval::new(at(6, 5), at(6, 5));
        assert!(r.validate().is_err());
        r.stay = StayInterval::new(at(6, 5), at(6, 1));
        assert!(r.validate().is_err());
    }

    #[test]
    fn rejects_bad_scalars() {
        let mut r = sample_new();
        r.visitor_quantity = 0;
        assert!(r.validate().is_err());

        let mut r = sample_new();
        r.client_name = "   ".into();
        assert!(r.validate().is_err());

        let mut r = sample_new();
        r.price = Decimal::new(-1, 0);
        assert!(r.validate().is_err());

        let mut r = sample_new();
        r.cabin_ids.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn check_in_and_out_span_all_cabins() {
        let reservation = Reservation {
            id: 7,
            client_name: "Ada".into(),
            visitor_quantity: 6,
            price: Decimal::ZERO,
            created_at: at(5, 1),
            cabin_reservations: vec![
                CabinReservation {
                    id: 1,
                    cabin_id: 1,
                    reservation_id: 7,
                    stay: StayInterval::new(at(6, 2), at(6, 5)),
                },
                CabinReservation {
                    id: 2,
                    cabin_id: 3,
                    reservation_id: 7,
                    stay: StayInterval::new(at(6, 1), at(6, 4)),
                },
            ],
        };
        assert_eq!(reservation.check_in(), Some(at(6, 1)));
        assert_eq!(reservation.check_out(), Some(at(6, 5)));
        assert_eq!(reservation.cabin_ids(), vec![1, 3]);
    }
}
