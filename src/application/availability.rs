//! Availability matching
//!
//! Pure filtering of the cabin catalog against existing bookings.

use std::collections::HashMap;

use crate::domain::{Cabin, StayInterval};

/// Cabins with no booked stay overlapping `stay`, in catalog order.
///
/// `existing` maps cabin id to its booked stays; cabins missing from the
/// map have no bookings.
pub fn find_available(
    stay: &StayInterval,
    cabins: &[Cabin],
    existing: &HashMap<i32, Vec<StayInterval>>,
) -> Vec<Cabin> {
    cabins
        .iter()
        .filter(|cabin| {
            existing
                .get(&cabin.id)
                .map_or(true, |booked| !booked.iter().any(|b| b.overlaps(stay)))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    fn stay(from: u32, to: u32) -> StayInterval {
        StayInterval::new(day(from), day(to))
    }

    fn catalog() -> Vec<Cabin> {
        vec![
            Cabin::new(1, "Birch", 2),
            Cabin::new(2, "Cedar", 4),
            Cabin::new(3, "Maple", 5),
        ]
    }

    #[test]
    fn empty_catalog_yields_nothing() {
        assert!(find_available(&stay(1, 5), &[], &HashMap::new()).is_empty());
    }

    #[test]
    fn no_bookings_yields_full_catalog() {
        assert_eq!(find_available(&stay(1, 5), &catalog(), &HashMap::new()), catalog());
    }

    #[test]
    fn overlapping_cabins_are_excluded_in_catalog_order() {
        let existing = HashMap::from([
            (2, vec![stay(10, 12), stay(4, 7)]),
            (3, vec![stay(5, 6)]),
        ]);
        let ids: Vec<i32> = find_available(&stay(1, 5), &catalog(), &existing)
            .iter()
            .map(|c| c.id)
            .collect();
        // cabin 3 is booked from the 5th, which is our checkout day
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn sound_and_complete() {
        let existing = HashMap::from([
            (1, vec![stay(2, 3)]),
            (3, vec![stay(20, 25)]),
            // bookings for cabins not in the catalog are ignored
            (99, vec![stay(1, 30)]),
        ]);
        let wanted = stay(1, 5);
        let available = find_available(&wanted, &catalog(), &existing);

        for cabin in &catalog() {
            let conflicted = existing
                .get(&cabin.id)
                .is_some_and(|v| v.iter().any(|b| b.overlaps(&wanted)));
            assert_eq!(available.contains(cabin), !conflicted, "cabin {}", cabin.id);
        }
    }
}
