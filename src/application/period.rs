//! Reservation period queries
//!
//! A listing request asks for one of three windows: a calendar month, or a
//! single local day matched against check-in or check-out. Windows are
//! half-open and computed in the configured UTC offset.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::domain::{Reservation, StayInterval};
use crate::shared::time::{first_of_next_month, local_midnight};

/// Which stay boundary a day query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    CheckIn,
    CheckOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodQuery {
    /// Reservations with any stay overlapping the calendar month
    Month { month: u32, year: i32 },
    /// Reservations with a check-in / check-out on the given local day
    Day { date: NaiveDate, field: DayField },
}

impl PeriodQuery {
    pub fn check_in_on(date: NaiveDate) -> Self {
        Self::Day {
            date,
            field: DayField::CheckIn,
        }
    }

    pub fn check_out_on(date: NaiveDate) -> Self {
        Self::Day {
            date,
            field: DayField::CheckOut,
        }
    }

    /// The half-open window `[start, end)` this query covers, or `None`
    /// when the month/year does not name a real calendar month or the
    /// window falls outside the representable range.
    pub fn window(&self, offset: FixedOffset) -> Option<StayInterval> {
        match *self {
            Self::Month { month, year } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let next = first_of_next_month(year, month)?;
                Some(StayInterval::new(
                    local_midnight(first, offset)?,
                    local_midnight(next, offset)?,
                ))
            }
            Self::Day { date, .. } => {
                let next = date.succ_opt()?;
                Some(StayInterval::new(
                    local_midnight(date, offset)?,
                    local_midnight(next, offset)?,
                ))
            }
        }
    }

    /// Whether `reservation` belongs to this query's `window`.
    pub fn matches(&self, reservation: &Reservation, window: &StayInterval) -> bool {
        let mut stays = reservation.cabin_reservations.iter().map(|cr| &cr.stay);
        match *self {
            Self::Month { .. } => stays.any(|s| s.overlaps(window)),
            Self::Day { field, .. } => stays.any(|s| window.contains(boundary(s, field))),
        }
    }
}

fn boundary(stay: &StayInterval, field: DayField) -> DateTime<Utc> {
    match field {
        DayField::CheckIn => stay.start,
        DayField::CheckOut => stay.end,
    }
}

/// Reservations from `reservations` matching `query`, keeping input order.
///
/// Returns an empty list when the query names no real calendar period.
pub fn filter_reservations(
    query: &PeriodQuery,
    offset: FixedOffset,
    reservations: &[Reservation],
) -> Vec<Reservation> {
    let Some(window) = query.window(offset) else {
        return Vec::new();
    };
    reservations
        .iter()
        .filter(|r| query.matches(r, &window))
        .cloned()
        .collect()
}
