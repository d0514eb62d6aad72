#![allow(clippy::unwrap_used)]

use super::*;
use crate::db::Database;

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    rdr.records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect()
}

fn sample_ledger() -> Ledger {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Web Ads", 100_000).unwrap();
    db.add_initiative("Events, Spring", 50_000).unwrap();
    db.upsert_actual("Web Ads", "2025-02".parse().unwrap(), 30_000)
        .unwrap();
    db.upsert_actual("Web Ads", "2025-01".parse().unwrap(), 40_000)
        .unwrap();
    db.upsert_actual("Events, Spring", "2025-01".parse().unwrap(), 60_000)
        .unwrap();
    Ledger::load(&db).unwrap()
}

#[test]
fn test_detail_csv_sorted_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detail.csv");

    let count = write_detail_csv(&path, &sample_ledger()).unwrap();
    assert_eq!(count, 3);

    let rows = read_rows(&path);
    assert_eq!(rows[0], vec!["initiative", "period", "amount"]);
    assert_eq!(rows[1], vec!["Events, Spring", "2025-01", "60000"]);
    assert_eq!(rows[2], vec!["Web Ads", "2025-01", "40000"]);
    assert_eq!(rows[3], vec!["Web Ads", "2025-02", "30000"]);
}

#[test]
fn test_summary_csv_includes_negative_remaining() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.csv");
    let ledger = sample_ledger();

    let count = write_summary_csv(&path, &ledger.summarize()).unwrap();
    assert_eq!(count, 2);

    let rows = read_rows(&path);
    assert_eq!(
        rows[0],
        vec!["initiative", "budget", "actual", "remaining", "rate"]
    );
    assert_eq!(rows[1], vec!["Web Ads", "100000", "70000", "30000", "70.0"]);
    assert_eq!(
        rows[2],
        vec!["Events, Spring", "50000", "60000", "-10000", "120.0"]
    );
}

#[test]
fn test_empty_ledger_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let count = write_detail_csv(&path, &Ledger::default()).unwrap();
    assert_eq!(count, 0);
    assert_eq!(read_rows(&path).len(), 1);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.csv");
    assert!(write_detail_csv(&path, &Ledger::default()).is_err());
}

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    assert_eq!(shellexpand("out.csv"), "out.csv");
}

#[test]
fn test_default_export_path_names_kind() {
    let path = default_export_path("summary");
    assert!(path.contains("yojitsu-summary-"));
    assert!(path.ends_with(".csv"));
}
