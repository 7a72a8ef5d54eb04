//! Date parsing and calendar helpers
//!
//! Request dates arrive either as RFC 3339 timestamps or as bare
//! `YYYY-MM-DD` dates. Bare dates mean local midnight in the configured
//! UTC offset; all instants are normalised to UTC.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a request date into a UTC instant.
///
/// Accepts `2024-06-01T14:00:00+02:00`, `2024-06-01T12:00:00Z`,
/// `2024-06-01T12:00:00` (taken as local time) and `2024-06-01`
/// (local midnight).
pub fn parse_instant(raw: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return local_to_utc(naive, offset);
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| local_midnight(date, offset))
}

/// Parse a request date into the local calendar day it falls on.
pub fn parse_local_date(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        return Some(date);
    }
    let instant = parse_instant(raw, offset)?;
    instant
        .naive_utc()
        .checked_add_signed(offset_delta(offset))
        .map(|local| local.date())
}

/// UTC instant of local midnight on `date`; `None` past the calendar range.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_time(NaiveTime::MIN), offset)
}

/// First day of the month after `(year, month)`.
pub fn first_of_next_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
}

/// Build a fixed offset from minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

fn offset_delta(offset: FixedOffset) -> Duration {
    Duration::seconds(i64::from(offset.local_minus_utc()))
}

fn local_to_utc(naive: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let shifted = naive.checked_sub_signed(offset_delta(offset))?;
    Some(Utc.from_utc_datetime(&shifted))
}
