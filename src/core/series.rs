//! Dense daily spending series for charting.
//!
//! Produces one record per calendar day of the target month, each carrying
//! a total for every team (0 when nothing was spent), so the chart layer
//! can assume a contiguous x-axis with no gaps. The series is built from a
//! single grouping pass over the expenditures rather than rescanning the
//! whole set for every (day, team) pair.

use crate::core::dates::days_in_month;
use crate::entities::{expenditure, team};
use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// One day of the spending series.
///
/// Serializes to `{ "day": 5, "date": "2024-03-05", "<team name>": 42.0 }`
/// with one key per team, which is the record shape chart consumers expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    /// Day of the month, 1-based
    pub day: u32,
    /// The calendar day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Total spent per team name on this day; every team is present
    #[serde(flatten)]
    pub totals: BTreeMap<String, f64>,
}

/// Builds the dense daily series for one month.
///
/// `expenditures` should already be scoped to the month; rows dated outside
/// it are ignored here as well, so either filtering strategy yields the
/// same series. Expenditures attributed to unknown teams are skipped.
///
/// # Errors
/// Returns [`Error::InvalidDate`] when (year, month) is not a valid
/// calendar month.
pub fn build_daily_series(
    year: i32,
    month: u32,
    teams: &[team::Model],
    expenditures: &[expenditure::Model],
) -> Result<Vec<DailyEntry>> {
    let days = days_in_month(year, month)?;

    let names_by_id: HashMap<&str, &str> = teams
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();

    // Single pre-aggregation pass: (date, team id) -> summed amount
    let mut daily_totals: HashMap<(NaiveDate, &str), f64> = HashMap::new();
    for exp in expenditures {
        if exp.date.year() != year || exp.date.month() != month {
            continue;
        }
        if !names_by_id.contains_key(exp.team_id.as_str()) {
            continue;
        }
        *daily_totals
            .entry((exp.date, exp.team_id.as_str()))
            .or_insert(0.0) += exp.amount;
    }

    let mut series = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            Error::InvalidDate {
                value: format!("{year}-{month:02}-{day:02}"),
            }
        })?;

        let totals: BTreeMap<String, f64> = teams
            .iter()
            .map(|t| {
                let total = daily_totals
                    .get(&(date, t.id.as_str()))
                    .copied()
                    .unwrap_or(0.0);
                (t.name.clone(), total)
            })
            .collect();

        series.push(DailyEntry { day, date, totals });
    }

    Ok(series)
}
