use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{BudgetError, Result};
use crate::models::PeriodMode;

// ---------------------------------------------------------------------------
// Period labels
// ---------------------------------------------------------------------------

pub fn label_for(date: NaiveDate, mode: PeriodMode) -> String {
    match mode {
        PeriodMode::Months => year_month(date),
        PeriodMode::Weeks => year_week(date),
    }
}

pub fn year_month(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Week label in the numbering the legacy charts shipped with:
/// `ceil((days since Jan 1st + Jan 1st weekday + 1) / 7)` with Sunday-based
/// weekdays. This is not ISO-8601 week numbering and must stay as is so that
/// labels keep matching historic data.
pub fn year_week(date: NaiveDate) -> String {
    format!("{:04}-KW{:02}", date.year(), week_number(date))
}

pub fn year_day(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

fn week_number(date: NaiveDate) -> i64 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap();
    let days = (date - jan1).num_days();
    let offset = jan1.weekday().num_days_from_sunday() as i64;
    (days + offset + 1 + 6) / 7
}

// ---------------------------------------------------------------------------
// Label parsing and representative dates
// ---------------------------------------------------------------------------

/// Splits a `YYYY-KWww` label into year and week.
pub fn parse_week_label(label: &str) -> Result<(i32, i64)> {
    let err = || BudgetError::UnparseableWeekLabel(label.to_string());
    let (year, week) = label.split_once("-KW").ok_or_else(err)?;
    let year: i32 = year.parse().map_err(|_| err())?;
    let week: i64 = week.parse().map_err(|_| err())?;
    Ok((year, week))
}

/// The representative weekday of a week label: day `2 + 7 * (week - 1)` of
/// that year, rolling over year boundaries like the original did.
pub fn week_reference_day(label: &str) -> Result<NaiveDate> {
    let (year, week) = parse_week_label(label)?;
    let day = 2 + 7 * (week - 1);
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|jan1| jan1 + Duration::days(day - 1))
        .ok_or_else(|| BudgetError::UnparseableWeekLabel(label.to_string()))
}

/// A `YYYY-MM` label maps to the first of that month.
pub fn month_reference_day(label: &str) -> Result<NaiveDate> {
    let err = || BudgetError::Other(format!("not a year-month label: {label}"));
    let (year, month) = label.split_once('-').ok_or_else(err)?;
    let year: i32 = year.parse().map_err(|_| err())?;
    let month: u32 = month.parse().map_err(|_| err())?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err)
}

/// First day of the period containing `date`, used for cutoff comparisons.
pub fn reference_day(date: NaiveDate, mode: PeriodMode) -> NaiveDate {
    match mode {
        PeriodMode::Months => NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap(),
        PeriodMode::Weeks => {
            let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap();
            let day = 2 + 7 * (week_number(date) - 1);
            jan1 + Duration::days(day - 1)
        }
    }
}

// ---------------------------------------------------------------------------
// Trailing-year window
// ---------------------------------------------------------------------------

/// Whether `period` falls in the trailing-year window ending at `reference`.
///
/// Months: rolling 12 calendar months anchored to the first of the window's
/// start month. Weeks: same year, or the previous year with a week number at
/// or past the reference week. The two branches are intentionally not
/// equivalent.
pub fn within_trailing_year(period: &str, reference: &str, mode: PeriodMode) -> Result<bool> {
    match mode {
        PeriodMode::Weeks => {
            let (curr_year, curr_week) = parse_week_label(period)?;
            let (ref_year, ref_week) = parse_week_label(reference)?;
            Ok(curr_year == ref_year || (curr_year == ref_year - 1 && curr_week >= ref_week))
        }
        PeriodMode::Months => {
            let curr = month_reference_day(period)?;
            let reference = month_reference_day(reference)?;
            let min = {
                let (year, month) = if reference.month() == 12 {
                    (reference.year(), 1)
                } else {
                    (reference.year() - 1, reference.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap()
            };
            Ok(curr >= min && curr <= reference)
        }
    }
}
