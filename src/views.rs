use std::cmp::Ordering;

use regex::Regex;

use crate::aggregator::Buckets;
use crate::catalog::{
    CategoryCatalog, LEISURE, LEISURE_PARTS, OVERALL, PURCHASES, PURCHASES_BASE, PURCHASES_CUTOFF,
    PURCHASES_LATE_ADDITION,
};
use crate::error::Result;
use crate::fmt;
use crate::ledger::Ledger;
use crate::models::{ClassifiedTransaction, PeriodMode};
use crate::period;

// Boilerplate the detail view strips from merged descriptions, applied only
// when the template is present verbatim.
const PAYPAL_LEGAL_NAME: &str = r"PayPal \(?Europe\)? S\.a.r\.l\. et Cie,? S\.C\.A\.?";
const ORIGIN_SUFFIX: &str = r"/(.+?)//[A-Z]{2}$";
const VISA_DEBIT_MEMO: &str = r".+Debitk\..+? VISA De\s?bit.*";

const TOTAL_ROW_TEXT: &str = "Summe aller Beiträge";

// ---------------------------------------------------------------------------
// Timeline series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: String,
    pub y: f64,
}

/// One chart-ready series for the timeline figure: actuals as lines, budgets
/// as bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
    pub kind: SeriesKind,
}

/// Builds per-category series over the last `last_n` periods (all of them if
/// `last_n` covers the available count), optionally with one budget series
/// per budgeted category. Ordered by descending series total so the largest
/// contributor comes first.
pub fn timeline_series(
    buckets: &Buckets,
    catalog: &CategoryCatalog,
    last_n: usize,
    with_budgets: bool,
) -> Result<Vec<ChartSeries>> {
    let skip = buckets.len().saturating_sub(last_n);
    let mut actuals: Vec<(String, Vec<ChartPoint>)> = Vec::new();
    let mut budgets: Vec<(String, Vec<ChartPoint>)> = Vec::new();

    for bucket in buckets.iter().skip(skip) {
        for (category, sum) in &bucket.sums {
            push_point(&mut actuals, category, &bucket.label, *sum);
            if let Some(budget) = catalog.budget_for(category, &bucket.label)? {
                push_point(&mut budgets, category, &bucket.label, budget);
            }
        }
    }

    let mut series: Vec<ChartSeries> = actuals
        .into_iter()
        .map(|(label, points)| ChartSeries {
            label,
            points,
            kind: SeriesKind::Line,
        })
        .collect();
    if with_budgets {
        series.extend(budgets.into_iter().map(|(label, points)| ChartSeries {
            label,
            points,
            kind: SeriesKind::Bar,
        }));
    }

    series.sort_by(|a, b| {
        series_total(b)
            .partial_cmp(&series_total(a))
            .unwrap_or(Ordering::Equal)
    });
    Ok(series)
}

fn push_point(series: &mut Vec<(String, Vec<ChartPoint>)>, category: &str, label: &str, y: f64) {
    let point = ChartPoint {
        x: label.to_string(),
        y,
    };
    match series.iter_mut().find(|(name, _)| name == category) {
        Some((_, points)) => points.push(point),
        None => series.push((category.to_string(), vec![point])),
    }
}

fn series_total(series: &ChartSeries) -> f64 {
    series.points.iter().map(|point| point.y).sum()
}

// ---------------------------------------------------------------------------
// Detail rows
// ---------------------------------------------------------------------------

/// Row filtering for the detail table: everything, or one period granularity
/// with optional period/category narrowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFilter {
    All,
    Periods(PeriodMode),
}

/// One row per matching transaction as `[date, category, amount, text]`,
/// plus a trailing synthetic total row. Composite category filters expand to
/// their constituents; empty period or category strings disable that filter.
pub fn detail_rows(
    ledger: &Ledger,
    mode: ModeFilter,
    period: &str,
    category: &str,
) -> Vec<[String; 4]> {
    let mut rows = Vec::new();
    let mut sum = 0.0;

    for entry in ledger.entries() {
        if let ModeFilter::Periods(period_mode) = mode {
            if !period.is_empty() && period != period::label_for(entry.date, period_mode) {
                continue;
            }
            if !matches_category(entry, category) {
                continue;
            }
        }
        rows.push([
            period::year_day(entry.date),
            entry.category.clone(),
            fmt::money(entry.amount),
            merged_info(&entry.counterparty, &entry.purpose),
        ]);
        sum += entry.amount;
    }

    rows.push([
        period.to_string(),
        OVERALL.to_string(),
        fmt::money(sum),
        TOTAL_ROW_TEXT.to_string(),
    ]);
    rows
}

fn matches_category(entry: &ClassifiedTransaction, category: &str) -> bool {
    match category {
        "" | OVERALL => true,
        LEISURE => LEISURE_PARTS.contains(&entry.category.as_str()),
        PURCHASES => {
            entry.category == PURCHASES_BASE
                || (entry.category == PURCHASES_LATE_ADDITION && entry.date >= PURCHASES_CUTOFF)
        }
        other => entry.category == other,
    }
}

/// Merges counterparty and purpose into one display string, stripping the
/// payment-processor legal-name template and the card-debit memo template
/// where they appear.
pub fn merged_info(counterparty: &str, purpose: &str) -> String {
    let counterparty = strip_pattern(counterparty, PAYPAL_LEGAL_NAME);
    let counterparty = strip_pattern(&counterparty, ORIGIN_SUFFIX);
    let purpose = strip_pattern(purpose, VISA_DEBIT_MEMO);

    [counterparty, purpose]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" | ")
}

fn strip_pattern(text: &str, pattern: &str) -> String {
    Regex::new(pattern)
        .map(|re| re.replace(text, "").into_owned())
        .unwrap_or_else(|_| text.to_string())
}
