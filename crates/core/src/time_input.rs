//! Parsing of the date and date-time strings accepted from riders,
//! operators and the flight data provider.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CoreError;
use crate::types::{LocalDate, LocalDateTime};

/// `YYYY-MM-DD`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD HH:MM:SS`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `YYYY-MM-DD` date. `field` names the input in the error message.
pub fn parse_date(field: &str, raw: &str) -> Result<LocalDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
        CoreError::Validation(format!("{field}: expected YYYY-MM-DD, got '{raw}' ({e})"))
    })
}

/// Parse a `YYYY-MM-DD HH:MM:SS` wall-clock time.
pub fn parse_date_time(field: &str, raw: &str) -> Result<LocalDateTime, CoreError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_FORMAT).map_err(|e| {
        CoreError::Validation(format!(
            "{field}: expected YYYY-MM-DD HH:MM:SS, got '{raw}' ({e})"
        ))
    })
}
