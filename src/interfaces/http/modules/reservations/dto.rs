//! Reservation DTOs

use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::PeriodQuery;
use crate::domain::{CabinReservation, NewReservation, Reservation, StayInterval};
use crate::interfaces::http::error::ApiError;
use crate::interfaces::http::modules::cabins::dto::non_blank;
use crate::shared::time::{parse_instant, parse_local_date};

/// Body of `POST /api/reservations`
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    /// Check-in, RFC 3339 or `YYYY-MM-DD`
    #[validate(required, length(min = 1))]
    pub date_in: Option<String>,
    /// Check-out, RFC 3339 or `YYYY-MM-DD`
    #[validate(required, length(min = 1))]
    pub date_out: Option<String>,
    #[validate(required, range(min = 1))]
    pub visitor_quantity: Option<i32>,
    /// Cabin ids to book, each at most once
    #[validate(required, length(min = 1))]
    pub cabins: Option<Vec<i32>>,
    #[validate(required, length(min = 1, max = 200))]
    pub client_name: Option<String>,
    /// Total price, caller supplied
    #[validate(required)]
    #[schema(value_type = String, example = "320.50")]
    pub price: Option<Decimal>,
}

impl CreateReservationRequest {
    pub fn into_new_reservation(self, offset: FixedOffset) -> Result<NewReservation, ApiError> {
        let (
            Some(date_in),
            Some(date_out),
            Some(visitor_quantity),
            Some(cabin_ids),
            Some(client_name),
            Some(price),
        ) = (
            self.date_in,
            self.date_out,
            self.visitor_quantity,
            self.cabins,
            self.client_name,
            self.price,
        )
        else {
            return Err(ApiError::MissingParameters);
        };

        let start = parse_instant(&date_in, offset)
            .ok_or_else(|| ApiError::invalid(format!("dateIn '{}' is not a date", date_in)))?;
        let end = parse_instant(&date_out, offset)
            .ok_or_else(|| ApiError::invalid(format!("dateOut '{}' is not a date", date_out)))?;

        Ok(NewReservation {
            client_name: client_name.trim().to_string(),
            visitor_quantity,
            price,
            cabin_ids,
            stay: StayInterval::new(start, end),
        })
    }
}

/// Response of a successful creation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationResponse {
    pub message: String,
    pub reservation_id: i32,
}

impl CreateReservationResponse {
    pub fn created(reservation_id: i32) -> Self {
        Self {
            message: "Reservation created successfully".to_string(),
            reservation_id,
        }
    }
}

/// One cabin's stay within a reservation
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CabinReservationDto {
    pub id: i32,
    pub id_cabin: i32,
    pub id_reservation: i32,
    pub date_in: DateTime<Utc>,
    pub date_out: DateTime<Utc>,
}

impl From<CabinReservation> for CabinReservationDto {
    fn from(cr: CabinReservation) -> Self {
        Self {
            id: cr.id,
            id_cabin: cr.cabin_id,
            id_reservation: cr.reservation_id,
            date_in: cr.stay.start,
            date_out: cr.stay.end,
        }
    }
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: i32,
    pub client_name: String,
    pub visitor_quantity: i32,
    #[schema(value_type = String, example = "320.50")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    /// Earliest check-in over the booked cabins
    pub date_in: Option<DateTime<Utc>>,
    /// Latest check-out over the booked cabins
    pub date_out: Option<DateTime<Utc>>,
    pub cabin_reservations: Vec<CabinReservationDto>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        let date_in = r.check_in();
        let date_out = r.check_out();
        Self {
            id: r.id,
            client_name: r.client_name,
            visitor_quantity: r.visitor_quantity,
            price: r.price,
            created_at: r.created_at,
            date_in,
            date_out,
            cabin_reservations: r
                .cabin_reservations
                .into_iter()
                .map(CabinReservationDto::from)
                .collect(),
        }
    }
}

/// Listing query: `month` + `year`, or `dateIn`, or `dateOut`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReservationListParams {
    /// Calendar month, 1-12 (with `year`)
    pub month: Option<String>,
    /// Calendar year (with `month`)
    pub year: Option<String>,
    /// Reservations checking in on this day
    pub date_in: Option<String>,
    /// Reservations checking out on this day
    pub date_out: Option<String>,
}

impl ReservationListParams {
    pub fn to_query(&self, offset: FixedOffset) -> Result<PeriodQuery, ApiError> {
        let month = non_blank(&self.month);
        let year = non_blank(&self.year);
        let date_in = non_blank(&self.date_in);
        let date_out = non_blank(&self.date_out);

        match (month, year, date_in, date_out) {
            (None, None, None, None) => Err(ApiError::MissingParameters),
            (Some(month), Some(year), None, None) => {
                let month: u32 = month
                    .parse()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| ApiError::invalid(format!("month '{}' is not 1-12", month)))?;
                let year: i32 = year
                    .parse()
                    .map_err(|_| ApiError::invalid(format!("year '{}' is not a number", year)))?;
                Ok(PeriodQuery::Month { month, year })
            }
            (Some(_), None, None, None) | (None, Some(_), None, None) => {
                Err(ApiError::MissingParameters)
            }
            (None, None, Some(day), None) => parse_local_date(day, offset)
                .map(PeriodQuery::check_in_on)
                .ok_or_else(|| ApiError::invalid(format!("dateIn '{}' is not a date", day))),
            (None, None, None, Some(day)) => parse_local_date(day, offset)
                .map(PeriodQuery::check_out_on)
                .ok_or_else(|| ApiError::invalid(format!("dateOut '{}' is not a date", day))),
            _ => Err(ApiError::invalid(
                "use either month and year, dateIn, or dateOut",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn list(month: Option<&str>, year: Option<&str>, din: Option<&str>, dout: Option<&str>) -> ReservationListParams {
        ReservationListParams {
            month: month.map(String::from),
            year: year.map(String::from),
            date_in: din.map(String::from),
            date_out: dout.map(String::from),
        }
    }

    #[test]
    fn listing_params_select_one_period() {
        assert_eq!(
            list(Some("4"), Some("2024"), None, None).to_query(utc()).unwrap(),
            PeriodQuery::Month { month: 4, year: 2024 }
        );
        let april_2 = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        assert_eq!(
            list(None, None, Some("2024-04-02"), None).to_query(utc()).unwrap(),
            PeriodQuery::check_in_on(april_2)
        );
        assert_eq!(
            list(None, None, None, Some("2024-04-02")).to_query(utc()).unwrap(),
            PeriodQuery::check_out_on(april_2)
        );
    }

    #[test]
    fn listing_params_reject_bad_combinations() {
        assert!(matches!(
            list(None, None, None, None).to_query(utc()),
            Err(ApiError::MissingParameters)
        ));
        assert!(matches!(
            list(Some("4"), None, None, None).to_query(utc()),
            Err(ApiError::MissingParameters)
        ));
        for bad in [
            list(Some("4"), Some("2024"), Some("2024-04-02"), None),
            list(None, None, Some("2024-04-02"), Some("2024-04-03")),
            list(Some("13"), Some("2024"), None, None),
            list(Some("4"), Some("twenty"), None, None),
            list(None, None, Some("yesterday"), None),
        ] {
            assert!(
                matches!(bad.to_query(utc()), Err(ApiError::InvalidParameters(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn create_request_converts_to_domain() {
        let req = CreateReservationRequest {
            date_in: Some("2024-06-01".into()),
            date_out: Some("2024-06-05T10:00:00Z".into()),
            visitor_quantity: Some(3),
            cabins: Some(vec![1, 2]),
            client_name: Some("  Ada ".into()),
            price: Some(Decimal::new(32050, 2)),
        };
        assert!(req.validate().is_ok());

        let new = req.into_new_reservation(utc()).unwrap();
        assert_eq!(new.client_name, "Ada");
        assert_eq!(new.cabin_ids, vec![1, 2]);
        assert_eq!(new.stay.start, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(new.stay.end, Utc.with_ymd_and_hms(2024, 6, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn create_request_rejects_bad_dates() {
        let req = CreateReservationRequest {
            date_in: Some("soon".into()),
            date_out: Some("2024-06-05".into()),
            visitor_quantity: Some(3),
            cabins: Some(vec![1]),
            client_name: Some("Ada".into()),
            price: Some(Decimal::ONE),
        };
        assert!(matches!(
            req.into_new_reservation(utc()),
            Err(ApiError::InvalidParameters(_))
        ));
    }

    #[test]
    fn reservation_dto_uses_camel_case_and_string_price() {
        let at = |d| Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap();
        let dto = ReservationDto::from(Reservation {
            id: 7,
            client_name: "Ada".into(),
            visitor_quantity: 2,
            price: Decimal::new(32050, 2),
            created_at: at(1),
            cabin_reservations: vec![CabinReservation {
                id: 11,
                cabin_id: 3,
                reservation_id: 7,
                stay: StayInterval::new(at(2), at(4)),
            }],
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["clientName"], "Ada");
        assert_eq!(json["price"], "320.50");
        assert_eq!(json["dateIn"], "2024-06-02T00:00:00Z");
        assert_eq!(json["cabinReservations"][0]["idCabin"], 3);
        assert_eq!(json["cabinReservations"][0]["dateOut"], "2024-06-04T00:00:00Z");
    }
}
