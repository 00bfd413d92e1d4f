use thiserror::Error;

#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Category configuration error: {0}")]
    Catalog(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Not a week-of-year label: {0}")]
    UnparseableWeekLabel(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
