use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;
use crate::models::RawRow;

/// Column names whose presence in a record marks it as the header row.
const HEADER_FIELDS: &[&str] = &["Buchungstag", "Buchungsdatum"];

/// Reads a semicolon-separated bank export from disk. See [`parse_export`].
pub fn read_export(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    parse_export(File::open(path)?)
}

/// Parses a bank export into raw rows, keyed by the column names of the
/// header row. Exports carry free-form preamble lines (account metadata,
/// balances) before the actual table, so everything up to the first record
/// containing a known date column is skipped. Row order is preserved as
/// exported, newest first.
pub fn parse_export<R: Read>(input: R) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for result in reader.records() {
        let Some(fields) = &header else {
            // preamble lines are often not even valid CSV; skip quietly
            let Ok(record) = result else { continue };
            if record.iter().any(|cell| HEADER_FIELDS.contains(&cell.trim())) {
                header = Some(record.iter().map(|cell| cell.trim().to_string()).collect());
            }
            continue;
        };

        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRow = fields
            .iter()
            .zip(record.iter())
            .map(|(field, cell)| (field.clone(), cell.trim().to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
