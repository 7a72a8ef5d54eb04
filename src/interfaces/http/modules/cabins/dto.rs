//! Cabin DTOs

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Cabin, StayInterval};
use crate::interfaces::http::error::ApiError;
use crate::shared::time::parse_instant;

/// Cabin as returned by the availability endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct CabinDto {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
}

impl From<Cabin> for CabinDto {
    fn from(c: Cabin) -> Self {
        Self {
            id: c.id,
            name: c.name,
            capacity: c.capacity,
        }
    }
}

/// Availability query. All three parameters are required; dates are
/// RFC 3339 instants or `YYYY-MM-DD` days.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AvailabilityParams {
    /// Check-in (inclusive)
    pub date_in: Option<String>,
    /// Check-out (exclusive)
    pub date_out: Option<String>,
    /// Party size
    pub visitor_quantity: Option<String>,
}

/// Availability request after parsing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityRequest {
    pub stay: StayInterval,
    pub party_size: i32,
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AvailabilityParams {
    pub fn parse(&self, offset: FixedOffset) -> Result<AvailabilityRequest, ApiError> {
        let (Some(date_in), Some(date_out), Some(quantity)) = (
            non_blank(&self.date_in),
            non_blank(&self.date_out),
            non_blank(&self.visitor_quantity),
        ) else {
            return Err(ApiError::MissingParameters);
        };

        let start = parse_instant(date_in, offset)
            .ok_or_else(|| ApiError::invalid(format!("dateIn '{}' is not a date", date_in)))?;
        let end = parse_instant(date_out, offset)
            .ok_or_else(|| ApiError::invalid(format!("dateOut '{}' is not a date", date_out)))?;
        let party_size: i32 = quantity.parse().map_err(|_| {
            ApiError::invalid(format!("visitorQuantity '{}' is not a number", quantity))
        })?;

        if party_size < 1 {
            return Err(ApiError::invalid("visitorQuantity must be at least 1"));
        }
        let stay = StayInterval::new(start, end);
        if stay.is_empty() {
            return Err(ApiError::invalid("dateOut must be after dateIn"));
        }

        Ok(AvailabilityRequest { stay, party_size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn params(date_in: &str, date_out: &str, quantity: &str) -> AvailabilityParams {
        AvailabilityParams {
            date_in: Some(date_in.into()),
            date_out: Some(date_out.into()),
            visitor_quantity: Some(quantity.into()),
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn parses_plain_dates_as_midnight() {
        let req = params("2024-06-01", "2024-06-05", "4").parse(utc()).unwrap();
        assert_eq!(req.party_size, 4);
        assert_eq!(req.stay.start, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(req.stay.end, Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn blank_or_absent_is_missing() {
        let mut p = params("2024-06-01", "2024-06-05", "4");
        p.visitor_quantity = None;
        assert!(matches!(p.parse(utc()), Err(ApiError::MissingParameters)));
        assert!(matches!(
            params("", "2024-06-05", "2").parse(utc()),
            Err(ApiError::MissingParameters)
        ));
        assert!(matches!(
            AvailabilityParams::default().parse(utc()),
            Err(ApiError::MissingParameters)
        ));
    }

    #[test]
    fn malformed_values_are_invalid() {
        for p in [
            params("June 1st", "2024-06-05", "2"),
            params("2024-06-01", "2024-06-05", "two"),
            params("2024-06-01", "2024-06-05", "0"),
            params("2024-06-05", "2024-06-01", "2"),
            params("2024-06-05", "2024-06-05", "2"),
        ] {
            assert!(matches!(p.parse(utc()), Err(ApiError::InvalidParameters(_))), "{p:?}");
        }
    }
}
