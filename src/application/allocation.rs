//! Capacity allocation
//!
//! Small parties get every cabin that can host them on its own; parties
//! above the group threshold get a greedy combination of cabins taken in
//! catalog order. The greedy cover is not minimal and depends on catalog
//! order; callers rely on that behaviour, so keep it.

use crate::domain::Cabin;

/// Default party size above which cabins are combined.
pub const DEFAULT_GROUP_THRESHOLD: i32 = 6;

/// How a party is matched to cabins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationPolicy {
    /// Every cabin whose own capacity covers the party
    DirectFit,
    /// Greedy prefix of cabins whose combined capacity covers the party
    Combination,
}

#[derive(Debug, Clone, Copy)]
pub struct CapacityAllocator {
    group_threshold: i32,
}

impl CapacityAllocator {
    pub fn new(group_threshold: i32) -> Self {
        Self { group_threshold }
    }

    pub fn group_threshold(&self) -> i32 {
        self.group_threshold
    }

    pub fn policy_for(&self, party_size: i32) -> AllocationPolicy {
        if party_size > self.group_threshold {
            AllocationPolicy::Combination
        } else {
            AllocationPolicy::DirectFit
        }
    }

    /// Cabins offered for `party_size`; empty when nothing fits.
    pub fn allocate(&self, available: &[Cabin], party_size: i32) -> Vec<Cabin> {
        match self.policy_for(party_size) {
            AllocationPolicy::DirectFit => direct_fit(available, party_size),
            AllocationPolicy::Combination => greedy_combination(available, party_size),
        }
    }
}

impl Default for CapacityAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP_THRESHOLD)
    }
}

fn direct_fit(available: &[Cabin], party_size: i32) -> Vec<Cabin> {
    available
        .iter()
        .filter(|c| c.fits(party_size))
        .cloned()
        .collect()
}

fn greedy_combination(available: &[Cabin], party_size: i32) -> Vec<Cabin> {
    let target = i64::from(party_size);
    let mut selected = Vec::new();
    let mut total: i64 = 0;

    for cabin in available {
        if total >= target {
            break;
        }
        selected.push(cabin.clone());
        total += i64::from(cabin.capacity);
    }

    if total >= target {
        selected
    } else {
        Vec::new()
    }
}
