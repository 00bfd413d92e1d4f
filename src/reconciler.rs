use std::collections::BTreeMap;

use crate::aggregator::Buckets;
use crate::catalog::{
    CategoryCatalog, OVERALL, PURCHASES_CUTOFF, PURCHASES_LATE_ADDITION, VACATION,
};
use crate::error::Result;
use crate::fmt;
use crate::models::PeriodMode;
use crate::period;

/// Categories whose remaining per-period budget is surfaced in the statement.
const MONTHLY_DISPLAY: &[&str] = &["Einkauf", "Freizeit"];
/// Categories whose trailing-year balance is surfaced in the statement.
const ANNUAL_DISPLAY: &[&str] = &["Urlaub", "Anschaffungen"];

/// Budget-vs-actual deltas for one requested period plus the trailing-year
/// rollup. All deltas are `actual - budget`, spend-positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetStatement {
    /// Per budgeted category in the requested period's bucket.
    pub period_deltas: BTreeMap<String, f64>,
    /// Per budgeted category, summed over the trailing-year window.
    pub year_deltas: BTreeMap<String, f64>,
    /// Unbudgeted spend that still counts against the annual balance:
    /// furnishing spend from before the purchases cutoff.
    pub extra_spending: BTreeMap<String, f64>,
    /// Sum of the yearly deltas (vacation excluded) plus extra spending.
    pub overall_balance: f64,
}

/// Reconciles the bucket for `period` and its trailing-year window against
/// the catalog's budget tranches. A period absent from the buckets yields an
/// empty statement, not an error.
pub fn budget_statement(
    buckets: &Buckets,
    catalog: &CategoryCatalog,
    mode: PeriodMode,
    period: &str,
) -> Result<BudgetStatement> {
    let mut statement = BudgetStatement::default();

    if let Some(bucket) = buckets.get(period) {
        for (category, actual) in &bucket.sums {
            if let Some(budget) = catalog.budget_for(category, period)? {
                statement
                    .period_deltas
                    .insert(category.clone(), actual - budget);
            }
        }
    }

    for bucket in buckets.iter() {
        if !period::within_trailing_year(&bucket.label, period, mode)? {
            continue;
        }
        for (category, actual) in &bucket.sums {
            match catalog.budget_for(category, &bucket.label)? {
                Some(budget) => {
                    *statement
                        .year_deltas
                        .entry(category.clone())
                        .or_insert(0.0) += actual - budget;
                }
                None => {
                    if category == PURCHASES_LATE_ADDITION && bucket.reference < PURCHASES_CUTOFF {
                        *statement
                            .extra_spending
                            .entry(category.clone())
                            .or_insert(0.0) += actual;
                    }
                }
            }
        }
    }

    let mut overall = 0.0;
    for amount in statement.extra_spending.values() {
        overall += amount;
    }
    for (category, amount) in &statement.year_deltas {
        if category != VACATION {
            overall += amount;
        }
    }
    statement.overall_balance = overall;

    Ok(statement)
}

/// The budget table as the presentation layer consumes it: one label row and
/// one value row. Monthly-cadence categories carry a `(m)`/`(w)` annotation
/// and show the period delta; annual categories carry `(y)` and show the
/// trailing-year balance. Categories ascending, the overall balance always
/// last under the `Gesamt` label. Values are display-negated, so a positive
/// figure means budget left over.
pub fn statement_rows(
    buckets: &Buckets,
    catalog: &CategoryCatalog,
    mode: PeriodMode,
    period: &str,
) -> Result<[Vec<String>; 2]> {
    if buckets.get(period).is_none() {
        return Ok([Vec::new(), Vec::new()]);
    }

    let statement = budget_statement(buckets, catalog, mode, period)?;
    let mut labels = Vec::new();
    let mut values = Vec::new();

    for (category, delta) in &statement.period_deltas {
        if MONTHLY_DISPLAY.contains(&category.as_str()) {
            labels.push(format!("{category} ({})", mode.cadence_letter()));
            values.push(fmt::money(*delta));
        }
        if ANNUAL_DISPLAY.contains(&category.as_str()) {
            labels.push(format!("{category} (y)"));
            values.push(fmt::money(
                statement.year_deltas.get(category).copied().unwrap_or(0.0),
            ));
        }
    }

    labels.push(OVERALL.to_string());
    values.push(fmt::money(statement.overall_balance));
    Ok([labels, values])
}
