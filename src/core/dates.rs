//! Calendar helpers shared by the aggregation engine and the store layer.
//!
//! Months are 1-based (chrono convention) everywhere in this crate. The
//! reporting timezone is fixed at UTC+8 and only affects which month the
//! dashboard shows by default; stored dates are plain calendar days and are
//! never reinterpreted.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate, TimeDelta, Utc};

/// Offset of the fixed reporting timezone (UTC+8), in hours.
const REPORTING_TZ_OFFSET_HOURS: i64 = 8;

/// Returns the first day of the given month.
///
/// # Errors
/// Returns [`Error::InvalidDate`] when the (year, month) pair is not a valid
/// calendar month.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| Error::InvalidDate {
        value: format!("{year}-{month:02}"),
    })
}

/// Returns the number of days in the given month, respecting leap years.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    // Difference between consecutive month starts is always 28..=31
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Returns the inclusive (first day, last day) bounds of the given month.
///
/// Used by the store to scope expenditure queries to a month; filtering
/// against these bounds is equivalent to comparing each row's date fields.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = first_of_month(year, month)?;
    let days = days_in_month(year, month)?;
    let last = NaiveDate::from_ymd_opt(year, month, days).ok_or_else(|| Error::InvalidDate {
        value: format!("{year}-{month:02}-{days:02}"),
    })?;
    Ok((first, last))
}

/// Returns today's date in the fixed reporting timezone (UTC+8).
///
/// Only used to pick the default dashboard month; never applied to stored
/// dates.
#[must_use]
pub fn reporting_today() -> NaiveDate {
    (Utc::now() + TimeDelta::hours(REPORTING_TZ_OFFSET_HOURS)).date_naive()
}

/// Returns the (year, month) pair of the current reporting month.
#[must_use]
pub fn current_reporting_month() -> (i32, u32) {
    let today = reporting_today();
    (today.year(), today.month())
}
