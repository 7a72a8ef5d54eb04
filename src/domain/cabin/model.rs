//! Cabin domain entity

use serde::{Deserialize, Serialize};

/// A bookable lodging unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabin {
    pub id: i32,
    pub name: String,
    /// Maximum number of guests
    pub capacity: i32,
}

impl Cabin {
    pub fn new(id: i32, name: impl Into<String>, capacity: i32) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
        }
    }

    /// Whether this cabin alone can host `party_size` guests.
    pub fn fits(&self, party_size: i32) -> bool {
        self.capacity >= party_size
    }
}

/// Sum of capacities, widened so large catalogs cannot overflow.
pub fn total_capacity<'a>(cabins: impl IntoIterator<Item = &'a Cabin>) -> i64 {
    cabins.into_iter().map(|c| i64::from(c.capacity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_is_inclusive() {
        let cabin = Cabin::new(1, "Pine", 4);
        assert!(cabin.fits(4));
        assert!(cabin.fits(1));
        assert!(!cabin.fits(5));
    }

    #[test]
    fn total_capacity_sums_all() {
        let cabins = [Cabin::new(1, "A", 2), Cabin::new(2, "B", 4), Cabin::new(3, "C", 5)];
        assert_eq!(total_capacity(&cabins), 11);
        assert_eq!(total_capacity(&[]), 0);
    }
}
