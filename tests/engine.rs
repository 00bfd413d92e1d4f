//! End-to-end runs over whole exports: file on disk through reading,
//! classification, bucketing and the budget statement.

use std::io::Write;

use anyhow::Result;
use budget_charts::{
    bucket_by, detail_rows, parse_export, read_export, statement_rows, timeline_series,
    CategoryCatalog, Ledger, ModeFilter, PeriodMode, SeriesKind,
};
use tempfile::NamedTempFile;

const CATALOG: &str = r#"[
    {"category": "Einkauf", "patterns": ["REWE", "EDEKA"], "budget": [
        {"since": "2023-01-01", "value": 400}
    ]},
    {"category": "Restaurant", "patterns": ["PIZZERIA"]},
    {"category": "Gehalt", "patterns": ["GEHALT"]},
    {"category": "Einzahlung", "patterns": ["EINZAHLUNG"]}
]"#;

const CLASSIC_EXPORT: &str = "\
Umsatzanzeige;Girokonto DE00 0000
Zeitraum:;30 Tage

Buchungstag;Auftraggeber / Begünstigter;Verwendungszweck;Betrag (EUR)
15.03.2024;REWE SAGT DANKE;Lebensmittel;-45,30
01.03.2024;Arbeitgeber GmbH;GEHALT März;2.000,00
";

fn catalog() -> CategoryCatalog {
    CategoryCatalog::from_json(CATALOG).unwrap()
}

#[test]
fn classic_export_from_disk_to_statement() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(CLASSIC_EXPORT.as_bytes())?;

    let rows = read_export(file.path())?;
    let catalog = catalog();
    let ledger = Ledger::build(&rows, &catalog)?;

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.entries()[0].category, "Gehalt");
    assert_eq!(ledger.entries()[1].category, "Einkauf");
    assert_eq!(ledger.latest_period(PeriodMode::Months), Some("2024-03".into()));

    let buckets = bucket_by(&ledger, &catalog, PeriodMode::Months);
    let bucket = buckets.get("2024-03").unwrap();
    assert_eq!(bucket.sums["Einkauf"], 45.30);
    assert!((bucket.sums["Gesamt"] - (45.30 - 2000.0)).abs() < 1e-9);

    let [labels, values] = statement_rows(&buckets, &catalog, PeriodMode::Months, "2024-03")?;
    assert_eq!(labels.last().map(String::as_str), Some("Gesamt"));
    assert_eq!(labels.len(), values.len());
    // remaining grocery budget this month: 400 - 45,30
    let idx = labels.iter().position(|l| l == "Einkauf (m)").unwrap();
    assert_eq!(values[idx], "354,70\u{a0}€");
    Ok(())
}

#[test]
fn modern_export_with_pending_rows() -> Result<()> {
    let export = "\
Buchungsdatum;Zahlungsempfänger*in;Verwendungszweck;Betrag (€);Status
16.03.24;EDEKA;Einkauf;-12,00 €;Vorgemerkt
15.03.24;REWE;Einkauf;-45,30 €;Gebucht
05.03.24;Automat;EINZAHLUNG;500,00 €;Gebucht
";
    let rows = parse_export(export.as_bytes())?;
    let catalog = catalog();
    let ledger = Ledger::build(&rows, &catalog)?;

    // pending and deposit rows both stay out
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.entries()[0].amount, -45.30);
    assert_eq!(ledger.entries()[0].running_total, -45.30);
    Ok(())
}

#[test]
fn week_mode_end_to_end() -> Result<()> {
    let rows = parse_export(CLASSIC_EXPORT.as_bytes())?;
    let catalog = catalog();
    let ledger = Ledger::build(&rows, &catalog)?;
    let buckets = bucket_by(&ledger, &catalog, PeriodMode::Weeks);

    assert_eq!(buckets.get("2024-KW11").unwrap().sums["Einkauf"], 45.30);
    let [labels, values] = statement_rows(&buckets, &catalog, PeriodMode::Weeks, "2024-KW11")?;
    let idx = labels.iter().position(|l| l == "Einkauf (w)").unwrap();
    // weekly budget is a quarter of the monthly tranche: 100 - 45,30
    assert_eq!(values[idx], "54,70\u{a0}€");
    Ok(())
}

#[test]
fn report_views_over_a_full_export() -> Result<()> {
    let rows = parse_export(CLASSIC_EXPORT.as_bytes())?;
    let catalog = catalog();
    let ledger = Ledger::build(&rows, &catalog)?;
    let buckets = bucket_by(&ledger, &catalog, PeriodMode::Months);

    let series = timeline_series(&buckets, &catalog, 12, true)?;
    let budget_bar = series
        .iter()
        .find(|s| s.kind == SeriesKind::Bar && s.label == "Einkauf")
        .unwrap();
    assert_eq!(budget_bar.points[0].y, 400.0);

    let rows = detail_rows(&ledger, ModeFilter::Periods(PeriodMode::Months), "2024-03", "");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.last().unwrap()[3], "Summe aller Beiträge");
    Ok(())
}
