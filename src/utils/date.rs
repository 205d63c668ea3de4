use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a mandatory `YYYY-MM-DD` argument.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Optional date argument, defaulting to today.
pub fn date_or_today(s: Option<&String>) -> AppResult<NaiveDate> {
    match s {
        Some(s) => require_date(s),
        None => Ok(today()),
    }
}
