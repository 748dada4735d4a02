use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::validation::{clean_optional, FieldErrors};
use crate::common::Validated;

/// Dashboard query string, as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Validated dashboard filter.
///
/// `status` is matched verbatim against the stored code, so an unrecognised
/// value yields an empty report rather than an error. Dates are inclusive and
/// compare against the UTC calendar date of `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardFilter {
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DashboardQuery {
    pub fn validate(&self) -> Validated<DashboardFilter> {
        let mut errors = FieldErrors::new();
        let start_date = parse_date(&mut errors, "start_date", self.start_date.as_deref());
        let end_date = parse_date(&mut errors, "end_date", self.end_date.as_deref());
        errors.into_result(|| DashboardFilter {
            status: clean_optional(self.status.as_deref()),
            start_date,
            end_date,
        })
    }
}

fn parse_date(errors: &mut FieldErrors, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = clean_optional(value)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Enter a valid date.");
            None
        }
    }
}
