use std::path::Path;

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{BudgetError, Result};
use crate::period;

// ---------------------------------------------------------------------------
// Fixed category rules
// ---------------------------------------------------------------------------

/// Classification outcome when no category pattern matches.
pub const UNKNOWN: &str = "unknown";
/// Classification outcome when more than one category pattern matches.
pub const AMBIGUOUS: &str = "ambiguous";

/// Non-spending transfer categories, excluded from the ledger entirely.
pub const IGNORED_CATEGORIES: &[&str] = &["Einzahlung", "Hund"];

/// Derived composite: sum over all categories in a bucket.
pub const OVERALL: &str = "Gesamt";
/// Derived leisure composite and its constituents.
pub const LEISURE: &str = "Freizeit";
pub const LEISURE_PARTS: &[&str] = &["Unternehmung", "Restaurant"];
/// Derived purchases composite: `Sonstiges`, plus `Einrichtung` for periods
/// on or after the cutoff below.
pub const PURCHASES: &str = "Anschaffungen";
pub const PURCHASES_BASE: &str = "Sonstiges";
pub const PURCHASES_LATE_ADDITION: &str = "Einrichtung";

/// Since this date, furnishing spend counts against the purchases budget.
/// Earlier furnishing spend surfaces as extra spending in the annual balance.
pub const PURCHASES_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2024, 2, 1) {
    Some(date) => date,
    None => panic!("invalid cutoff date"),
};

/// Tracked annually but excluded from the headline balance.
pub const VACATION: &str = "Urlaub";

/// Side-categories that borrow another category's budget tranches.
fn budget_alias(category: &str) -> &str {
    match category {
        "Unternehmung" => LEISURE,
        "Sonstiges" => PURCHASES,
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Configuration model
// ---------------------------------------------------------------------------

/// A budget amount effective from `since` until superseded by the next
/// tranche. Within one category the tranches must arrive sorted ascending by
/// `since`; the configuration is trusted, not validated.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetTranche {
    pub since: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefinition {
    pub category: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub budget: Vec<BudgetTranche>,
}

// ---------------------------------------------------------------------------
// CategoryCatalog
// ---------------------------------------------------------------------------

/// Compiled category definitions: one case-insensitive alternation pattern
/// per category, plus the budget tranches. Built once, immutable afterwards,
/// safe to share read-only across loads.
pub struct CategoryCatalog {
    definitions: Vec<CategoryDefinition>,
    matchers: Vec<(String, Regex)>,
}

impl CategoryCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<CategoryDefinition> =
            serde_json::from_str(json).map_err(|e| BudgetError::Catalog(e.to_string()))?;
        Self::compile(definitions)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The category configuration shipped with the crate.
    pub fn default_catalog() -> Result<Self> {
        Self::from_json(include_str!("categories.json"))
    }

    pub fn compile(definitions: Vec<CategoryDefinition>) -> Result<Self> {
        let mut matchers = Vec::with_capacity(definitions.len());
        for def in &definitions {
            let pattern = format!("({})", def.patterns.join("|"));
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    BudgetError::Catalog(format!("bad pattern for '{}': {e}", def.category))
                })?;
            matchers.push((def.category.clone(), regex));
        }
        Ok(Self {
            definitions,
            matchers,
        })
    }

    pub fn known_categories(&self) -> Vec<&str> {
        self.matchers.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Assigns a category by matching every compiled pattern against
    /// `counterparty + "#" + purpose`. Zero matches yield [`UNKNOWN`], more
    /// than one yields [`AMBIGUOUS`]; both are ordinary outcomes so that
    /// mis-tagged spend stays visible instead of failing the load.
    pub fn classify(&self, counterparty: &str, purpose: &str) -> &str {
        let combined = format!("{counterparty}#{purpose}");
        let mut matched = self
            .matchers
            .iter()
            .filter(|(_, pattern)| pattern.is_match(&combined));
        match (matched.next(), matched.next()) {
            (None, _) => UNKNOWN,
            (Some((name, _)), None) => name.as_str(),
            (Some(_), Some(_)) => AMBIGUOUS,
        }
    }

    /// The budget applicable to `category` in the period named by
    /// `period_label`: the last tranche whose effective date is at or before
    /// the period's reference date. Week periods get a quarter of the monthly
    /// value. `Ok(None)` means unbudgeted.
    pub fn budget_for(&self, category: &str, period_label: &str) -> Result<Option<f64>> {
        let week_budget = period_label.contains("KW");
        let reference = if week_budget {
            period::week_reference_day(period_label)?
        } else {
            period::month_reference_day(period_label)?
        };

        let mut current = None;
        for def in &self.definitions {
            if budget_alias(&def.category) != category {
                continue;
            }
            if def.budget.is_empty() {
                return Ok(None);
            }
            for tranche in &def.budget {
                if reference < tranche.since {
                    break;
                }
                current = Some(if week_budget {
                    tranche.value / 4.0
                } else {
                    tranche.value
                });
            }
        }
        Ok(current)
    }
}
