use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::catalog::{
    CategoryCatalog, IGNORED_CATEGORIES, LEISURE, LEISURE_PARTS, OVERALL, PURCHASES,
    PURCHASES_BASE, PURCHASES_CUTOFF, PURCHASES_LATE_ADDITION, UNKNOWN,
};
use crate::ledger::Ledger;
use crate::models::PeriodMode;
use crate::period;

/// Category sums for one period, spend-positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    /// First day of the period, for cutoff comparisons.
    pub reference: NaiveDate,
    pub sums: BTreeMap<String, f64>,
}

/// Buckets in chronological order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    buckets: Vec<Bucket>,
}

impl Buckets {
    pub fn get(&self, label: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Buckets the ledger by month or week and computes the derived composite
/// entries per bucket: `Gesamt` over everything, `Freizeit` over the leisure
/// pair, `Anschaffungen` over `Sonstiges` plus, from the cutoff on,
/// `Einrichtung`. When nothing at all was unclassified the `unknown` key is
/// dropped again so no zero-valued series shows up.
pub fn bucket_by(ledger: &Ledger, catalog: &CategoryCatalog, mode: PeriodMode) -> Buckets {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut unknown_total = 0.0;

    for entry in ledger.entries() {
        let label = period::label_for(entry.date, mode);
        let idx = match buckets.iter().position(|b| b.label == label) {
            Some(idx) => idx,
            None => {
                buckets.push(seed_bucket(
                    label,
                    period::reference_day(entry.date, mode),
                    catalog,
                ));
                buckets.len() - 1
            }
        };
        // sign flip: bucket sums are spend-positive
        *buckets[idx]
            .sums
            .entry(entry.category.clone())
            .or_insert(0.0) -= entry.amount;
        if entry.category == UNKNOWN {
            unknown_total -= entry.amount;
        }
    }

    for bucket in &mut buckets {
        let mut overall = 0.0;
        let mut leisure = 0.0;
        let mut purchases = 0.0;
        for (category, amount) in &bucket.sums {
            overall += amount;
            if LEISURE_PARTS.contains(&category.as_str()) {
                leisure += amount;
            }
            if category == PURCHASES_BASE
                || (category == PURCHASES_LATE_ADDITION && bucket.reference >= PURCHASES_CUTOFF)
            {
                purchases += amount;
            }
        }
        bucket.sums.insert(OVERALL.to_string(), overall);
        bucket.sums.insert(LEISURE.to_string(), leisure);
        bucket.sums.insert(PURCHASES.to_string(), purchases);
    }

    if unknown_total == 0.0 {
        for bucket in &mut buckets {
            bucket.sums.remove(UNKNOWN);
        }
    }

    Buckets { buckets }
}

/// Every known category starts at zero on first touch of a period, so later
/// per-category lookups need no existence check. Ignored categories stay
/// out; `unknown` is tracked like a regular category.
fn seed_bucket(label: String, reference: NaiveDate, catalog: &CategoryCatalog) -> Bucket {
    let mut sums = BTreeMap::new();
    for category in catalog.known_categories() {
        if IGNORED_CATEGORIES.contains(&category) {
            continue;
        }
        sums.insert(category.to_string(), 0.0);
    }
    sums.insert(UNKNOWN.to_string(), 0.0);
    Bucket {
        label,
        reference,
        sums,
    }
}
