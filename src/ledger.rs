use chrono::Duration;

use crate::catalog::{CategoryCatalog, IGNORED_CATEGORIES};
use crate::error::Result;
use crate::models::{ClassifiedTransaction, PeriodMode, RawRow};
use crate::normalizer;
use crate::period;

/// The ordered collection of classified transactions for one loaded export,
/// chronological ascending. Ignored categories and pending rows never enter;
/// the running total covers exactly the entries that did.
pub struct Ledger {
    entries: Vec<ClassifiedTransaction>,
}

impl Ledger {
    /// Builds the ledger in one pass. Exports arrive newest-first, so the
    /// rows are reversed up front. The first malformed row aborts the whole
    /// load.
    pub fn build(rows: &[RawRow], catalog: &CategoryCatalog) -> Result<Ledger> {
        let dialect = normalizer::detect_dialect(rows);
        let mut entries = Vec::with_capacity(rows.len());
        let mut running_total = 0.0;

        for row in rows.iter().rev() {
            let Some(tx) = normalizer::normalize_row(row, dialect)? else {
                continue;
            };
            let category = catalog.classify(&tx.counterparty, &tx.purpose).to_string();
            if IGNORED_CATEGORIES.contains(&category.as_str()) {
                continue;
            }
            running_total += tx.amount;
            entries.push(ClassifiedTransaction {
                date: tx.date,
                counterparty: tx.counterparty,
                purpose: tx.purpose,
                amount: tx.amount,
                category,
                running_total,
            });
        }

        Ok(Ledger { entries })
    }

    pub fn entries(&self) -> &[ClassifiedTransaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Period label of the newest entry, if any.
    pub fn latest_period(&self, mode: PeriodMode) -> Option<String> {
        self.entries
            .last()
            .map(|entry| period::label_for(entry.date, mode))
    }

    /// Entries dated after (newest date - `day_span` days).
    pub fn records_since(&self, day_span: i64) -> &[ClassifiedTransaction] {
        let Some(last) = self.entries.last() else {
            return &self.entries;
        };
        let floor = last.date - Duration::days(day_span);
        let start = self.entries.partition_point(|entry| entry.date <= floor);
        &self.entries[start..]
    }
}
