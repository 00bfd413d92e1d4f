//! Turns exported bank-account transaction rows into categorized,
//! time-bucketed spending summaries with budget-comparison statements.
//!
//! The pipeline is batch-oriented and stateless: read an export into raw
//! rows, normalize them into transactions, classify each one against the
//! category catalog, bucket by month or week, and reconcile actual spend
//! against the time-scoped budget tranches. Rendering belongs to the caller;
//! the engine produces structured report data.

pub mod aggregator;
pub mod catalog;
pub mod error;
pub mod fmt;
pub mod ledger;
pub mod models;
pub mod normalizer;
pub mod period;
pub mod reader;
pub mod reconciler;
pub mod views;

pub use aggregator::{bucket_by, Bucket, Buckets};
pub use catalog::CategoryCatalog;
pub use error::{BudgetError, Result};
pub use ledger::Ledger;
pub use models::{ClassifiedTransaction, Dialect, NormalizedTransaction, PeriodMode, RawRow};
pub use reader::{parse_export, read_export};
pub use reconciler::{budget_statement, statement_rows, BudgetStatement};
pub use views::{detail_rows, timeline_series, ChartPoint, ChartSeries, ModeFilter, SeriesKind};
