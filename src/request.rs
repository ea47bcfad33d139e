//! Booking request construction and validation.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{BookerError, Result};

/// Raw field values captured from the booking form.
///
/// Everything is a string at this layer; [`BookingRequest::build`] is where
/// the values are trimmed, parsed, and rejected.
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub customer_name: String,

    /// Unit type to book (e.g., "10x10")
    pub unit_type: String,

    /// Requested start date as `YYYY-MM-DD`
    pub start_date: String,

    /// Facility to book at, for callers booking across sites
    pub facility_id: Option<String>,

    /// End date as `YYYY-MM-DD`; the booking is open-ended when absent
    pub end_date: Option<String>,
}

/// A validated booking submission, ready to send.
///
/// `booking_id` is generated exactly once, when the request is built, and is
/// reused for every retry of the same logical submission so the server can
/// deduplicate repeated deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub booking_id: String,
    pub customer_name: String,
    pub unit_type: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl BookingRequest {
    /// Validate a form and build the canonical request.
    ///
    /// # Errors
    /// Returns [`BookerError::Validation`] if a required field is empty
    /// after trimming, a date does not parse as `YYYY-MM-DD`, or the end
    /// date precedes the start date.
    pub fn build(form: &BookingForm) -> Result<Self> {
        let customer_name = required(&form.customer_name, "customer_name")?;
        let unit_type = required(&form.unit_type, "unit_type")?;
        let start_date = parse_date(&form.start_date, "start_date")?;

        let facility_id = match form.facility_id.as_deref() {
            Some(raw) => Some(required(raw, "facility_id")?),
            None => None,
        };

        let end_date = match form.end_date.as_deref() {
            Some(raw) => {
                let end = parse_date(raw, "end_date")?;
                if end < start_date {
                    return Err(BookerError::Validation(format!(
                        "end_date {end} precedes start_date {start_date}"
                    )));
                }
                Some(end)
            }
            None => None,
        };

        Ok(Self {
            booking_id: Uuid::new_v4().to_string(),
            customer_name,
            unit_type,
            start_date,
            facility_id,
            end_date,
        })
    }
}

fn required(raw: &str, field: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BookerError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| BookerError::Validation(format!("{field} is not a valid date: {e}")))
}
