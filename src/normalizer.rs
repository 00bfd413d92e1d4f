use chrono::NaiveDate;

use crate::error::{BudgetError, Result};
use crate::models::{Dialect, NormalizedTransaction, RawRow};

// Field names of the older export dialect.
const CLASSIC_DATE: &str = "Buchungstag";
const CLASSIC_COUNTERPARTY: &str = "Auftraggeber / Begünstigter";
const CLASSIC_PURPOSE: &str = "Verwendungszweck";
const CLASSIC_AMOUNT: &str = "Betrag (EUR)";

// Field names of the newer export dialect.
const MODERN_DATE: &str = "Buchungsdatum";
const MODERN_COUNTERPARTY: &str = "Zahlungsempfänger*in";
const MODERN_PURPOSE: &str = "Verwendungszweck";
const MODERN_AMOUNT: &str = "Betrag (€)";
const MODERN_STATUS: &str = "Status";
const PENDING_MARKER: &str = "Vorgemerkt";

/// Decides the dialect for a whole batch: any row carrying the classic date
/// field marks the batch as classic, otherwise it is modern.
pub fn detect_dialect(rows: &[RawRow]) -> Dialect {
    if rows.iter().any(|row| row.contains_key(CLASSIC_DATE)) {
        Dialect::Classic
    } else {
        Dialect::Modern
    }
}

/// Decodes one raw row into a normalized transaction. Pending rows of the
/// modern dialect return `Ok(None)` (skip, not an error); a missing or
/// undecodable field is fatal for the row. Pure function of the input.
pub fn normalize_row(row: &RawRow, dialect: Dialect) -> Result<Option<NormalizedTransaction>> {
    if dialect == Dialect::Modern
        && row.get(MODERN_STATUS).map(String::as_str) == Some(PENDING_MARKER)
    {
        return Ok(None);
    }

    let (date_field, counterparty_field, purpose_field, amount_field) = match dialect {
        Dialect::Classic => (
            CLASSIC_DATE,
            CLASSIC_COUNTERPARTY,
            CLASSIC_PURPOSE,
            CLASSIC_AMOUNT,
        ),
        Dialect::Modern => (
            MODERN_DATE,
            MODERN_COUNTERPARTY,
            MODERN_PURPOSE,
            MODERN_AMOUNT,
        ),
    };

    Ok(Some(NormalizedTransaction {
        date: parse_date(require(row, date_field)?)?,
        counterparty: require(row, counterparty_field)?.to_string(),
        purpose: require(row, purpose_field)?.to_string(),
        amount: parse_amount(require(row, amount_field)?)?,
    }))
}

fn require<'a>(row: &'a RawRow, field: &str) -> Result<&'a str> {
    row.get(field)
        .map(String::as_str)
        .ok_or_else(|| BudgetError::MalformedRow(format!("missing field '{field}'")))
}

/// Parses `DD.MM.YYYY` or `DD.MM.YY` (two-digit years mean 20YY).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let err = || BudgetError::MalformedRow(format!("unrecognized date '{raw}'"));
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(err());
    }
    let day: u32 = parts[0].parse().map_err(|_| err())?;
    let month: u32 = parts[1].parse().map_err(|_| err())?;
    let mut year: i32 = parts[2].parse().map_err(|_| err())?;
    if parts[2].len() == 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(err)
}

/// Parses a German-formatted amount: `.` thousands separators, decimal
/// comma, optional trailing euro sign.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned = raw.replace('.', "").replace(',', ".");
    let cleaned = cleaned.trim().trim_end_matches('€').trim_end();
    cleaned
        .parse()
        .map_err(|_| BudgetError::MalformedRow(format!("unparseable amount '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, &str)]) -> RawRow {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_date() {
        let d = parse_date("15.03.2024").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        // two-digit years land in the 2000s
        let d = parse_date("01.12.23").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2024-03-15").is_err());
        assert!(parse_date("32.01.2024").is_err());
        assert!(parse_date("15.13.2024").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("45,30").unwrap(), 45.30);
        assert_eq!(parse_amount("2.000,00").unwrap(), 2000.0);
        assert_eq!(parse_amount("-1.234,56").unwrap(), -1234.56);
        assert_eq!(parse_amount("-12,99 €").unwrap(), -12.99);
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_detect_dialect() {
        let classic = vec![row(&[("Buchungstag", "01.01.2024")])];
        let modern = vec![row(&[("Buchungsdatum", "01.01.2024")])];
        assert_eq!(detect_dialect(&classic), Dialect::Classic);
        assert_eq!(detect_dialect(&modern), Dialect::Modern);
        assert_eq!(detect_dialect(&[]), Dialect::Modern);
    }

    #[test]
    fn test_normalize_classic_row() {
        let r = row(&[
            ("Buchungstag", "15.03.2024"),
            ("Auftraggeber / Begünstigter", "REWE SAGT DANKE"),
            ("Verwendungszweck", "Lebensmittel"),
            ("Betrag (EUR)", "-45,30"),
        ]);
        let tx = normalize_row(&r, Dialect::Classic).unwrap().unwrap();
        assert_eq!(tx.counterparty, "REWE SAGT DANKE");
        assert_eq!(tx.amount, -45.30);
    }

    #[test]
    fn test_normalize_modern_row() {
        let r = row(&[
            ("Buchungsdatum", "15.03.24"),
            ("Zahlungsempfänger*in", "REWE SAGT DANKE"),
            ("Verwendungszweck", "Lebensmittel"),
            ("Betrag (€)", "-45,3 €"),
            ("Status", "Gebucht"),
        ]);
        let tx = normalize_row(&r, Dialect::Modern).unwrap().unwrap();
        assert_eq!(tx.amount, -45.3);
    }

    #[test]
    fn test_pending_row_is_skipped_not_an_error() {
        let r = row(&[
            ("Buchungsdatum", "15.03.24"),
            ("Status", "Vorgemerkt"),
        ]);
        assert!(normalize_row(&r, Dialect::Modern).unwrap().is_none());
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let r = row(&[("Buchungstag", "15.03.2024")]);
        let result = normalize_row(&r, Dialect::Classic);
        assert!(matches!(result, Err(BudgetError::MalformedRow(_))));
    }
}
