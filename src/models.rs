use std::collections::BTreeMap;

use chrono::NaiveDate;

/// One exported row as handed over by the file-reading layer: field name
/// mapped to raw text.
pub type RawRow = BTreeMap<String, String>;

/// The two known export dialects. They map different field names onto the
/// same four logical fields and differ in amount-string decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Older exports keyed by `Buchungstag`.
    Classic,
    /// Newer exports keyed by `Buchungsdatum`, with a `Status` column that
    /// marks pending entries.
    Modern,
}

/// Calendar bucketing granularity for aggregation and budget statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMode {
    Months,
    Weeks,
}

impl PeriodMode {
    /// Single-letter cadence annotation used in budget statement labels.
    pub fn cadence_letter(&self) -> char {
        match self {
            PeriodMode::Months => 'm',
            PeriodMode::Weeks => 'w',
        }
    }
}

/// One raw row decoded into the four logical fields. Positive amounts are
/// money received; display layers negate so spending shows positive.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    pub date: NaiveDate,
    pub counterparty: String,
    pub purpose: String,
    pub amount: f64,
}

/// A normalized transaction with its assigned category and the cumulative
/// signed total of all ledger entries up to and including this one.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTransaction {
    pub date: NaiveDate,
    pub counterparty: String,
    pub purpose: String,
    pub amount: f64,
    pub category: String,
    pub running_total: f64,
}
