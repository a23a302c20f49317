//! Calendar-day and time-of-day helpers.
//!
//! Every date that crosses the library boundary as text is a local calendar
//! day in `YYYY-MM-DD` form. Parsing is strict: anything else is an
//! [`ValidationError::InvalidDate`], never a placeholder date.

use chrono::{Local, NaiveDate, NaiveTime};

use crate::error::ValidationError;

/// Format used for date keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a `YYYY-MM-DD` date key.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Format a date as its `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse an `HH:MM` time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime, ValidationError> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 5
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 => *b == b':',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(ValidationError::InvalidTime(s.to_string()));
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|_| ValidationError::InvalidTime(s.to_string()))
}

/// Today's date on the local calendar.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
