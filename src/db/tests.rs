#![allow(clippy::unwrap_used)]

use super::*;

fn period(s: &str) -> YearMonth {
    s.parse().unwrap()
}

fn setup_campaigns(db: &Database) {
    db.add_initiative("Campaign X", 100_000).unwrap();
    db.add_initiative("Campaign Y", 50_000).unwrap();
    db.upsert_actual("Campaign X", period("2025-01"), 40_000).unwrap();
    db.upsert_actual("Campaign X", period("2025-02"), 25_000).unwrap();
    db.upsert_actual("Campaign Y", period("2025-01"), 10_000).unwrap();
}

// ── Initiative store ──────────────────────────────────────────

#[test]
fn test_add_and_list_in_insertion_order() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Zeta", 10).unwrap();
    db.add_initiative("Alpha", 20).unwrap();
    db.add_initiative("Mid", 30).unwrap();

    let names: Vec<String> = db
        .get_initiatives()
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_add_returns_stored_initiative() {
    let db = Database::open_in_memory().unwrap();
    let added = db.add_initiative("Campaign X", 100_000).unwrap();
    assert_eq!(added.name, "Campaign X");
    assert_eq!(added.budget, 100_000);
    assert_eq!(db.find_initiative("Campaign X").unwrap(), Some(added));
}

#[test]
fn test_names_are_kept_byte_exact() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();
    let spaced = db.add_initiative("Campaign X ", 5_000).unwrap();
    assert_eq!(spaced.name, "Campaign X ");

    assert_eq!(db.get_initiatives().unwrap().len(), 2);
    assert_eq!(db.find_initiative("Campaign X").unwrap().unwrap().budget, 100_000);
    assert_eq!(db.find_initiative("Campaign X ").unwrap().unwrap().budget, 5_000);
}

#[test]
fn test_add_duplicate_name_rejected_and_store_unchanged() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();

    let err = db.add_initiative("Campaign X", 5_000).unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateName(ref n) if n == "Campaign X"));

    let all = db.get_initiatives().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].budget, 100_000);
}

#[test]
fn test_duplicate_check_is_case_sensitive() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();
    db.add_initiative("campaign x", 1_000).unwrap();
    assert_eq!(db.get_initiatives().unwrap().len(), 2);
}

#[test]
fn test_add_rejects_empty_name() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.add_initiative("", 1_000),
        Err(LedgerError::InvalidInput(_))
    ));
    assert!(matches!(
        db.add_initiative("   ", 1_000),
        Err(LedgerError::InvalidInput(_))
    ));
    assert!(db.get_initiatives().unwrap().is_empty());
}

#[test]
fn test_add_rejects_non_positive_budget() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.add_initiative("Zero", 0),
        Err(LedgerError::InvalidInput(_))
    ));
    assert!(matches!(
        db.add_initiative("Negative", -5),
        Err(LedgerError::InvalidInput(_))
    ));
    assert!(db.get_initiatives().unwrap().is_empty());
}

#[test]
fn test_rename_moves_actuals() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);
    let before = db.total_for("Campaign X").unwrap();

    db.rename_initiative("Campaign X", "Campaign Z").unwrap();

    assert_eq!(db.total_for("Campaign Z").unwrap(), before);
    assert_eq!(db.total_for("Campaign X").unwrap(), 0);
    let actuals = db.get_actuals().unwrap();
    assert!(actuals.iter().all(|a| a.initiative_name != "Campaign X"));
    assert_eq!(
        actuals
            .iter()
            .filter(|a| a.initiative_name == "Campaign Z")
            .count(),
        2
    );
}

#[test]
fn test_rename_keeps_position_and_budget() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);
    db.rename_initiative("Campaign X", "Renamed").unwrap();

    let all = db.get_initiatives().unwrap();
    assert_eq!(all[0].name, "Renamed");
    assert_eq!(all[0].budget, 100_000);
    assert_eq!(all[1].name, "Campaign Y");
}

#[test]
fn test_rename_collision_rejected() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);

    let err = db.rename_initiative("Campaign X", "Campaign Y").unwrap_err();
    assert!(matches!(err, LedgerError::DuplicateName(_)));
    assert!(db.find_initiative("Campaign X").unwrap().is_some());
    assert_eq!(db.total_for("Campaign Y").unwrap(), 10_000);
}

#[test]
fn test_rename_to_same_name_is_noop() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);
    db.rename_initiative("Campaign X", "Campaign X").unwrap();
    assert_eq!(db.total_for("Campaign X").unwrap(), 65_000);
}

#[test]
fn test_rename_missing_or_empty() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);
    assert!(matches!(
        db.rename_initiative("Nope", "Other"),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        db.rename_initiative("Campaign X", " "),
        Err(LedgerError::InvalidInput(_))
    ));
}

#[test]
fn test_set_budget() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();

    db.set_budget("Campaign X", 0).unwrap();
    assert_eq!(db.find_initiative("Campaign X").unwrap().unwrap().budget, 0);

    assert!(matches!(
        db.set_budget("Missing", 10),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        db.set_budget("Campaign X", -1),
        Err(LedgerError::InvalidInput(_))
    ));
}

#[test]
fn test_update_initiative_is_atomic() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);

    db.update_initiative("Campaign X", "Campaign X2", 120_000)
        .unwrap();
    let updated = db.find_initiative("Campaign X2").unwrap().unwrap();
    assert_eq!(updated.budget, 120_000);

    // Negative budget fails after the rename step; the rename must roll back.
    let err = db
        .update_initiative("Campaign X2", "Campaign X3", -10)
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(db.find_initiative("Campaign X2").unwrap().is_some());
    assert!(db.find_initiative("Campaign X3").unwrap().is_none());
}

#[test]
fn test_remove_cascades_to_actuals() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);

    let removed = db.remove_initiative("Campaign X").unwrap();
    assert_eq!(removed, 2);
    assert_eq!(db.total_for("Campaign X").unwrap(), 0);
    assert!(db
        .get_actuals()
        .unwrap()
        .iter()
        .all(|a| a.initiative_name != "Campaign X"));
    assert_eq!(db.total_for("Campaign Y").unwrap(), 10_000);
}

#[test]
fn test_remove_missing() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.remove_initiative("Ghost"),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn test_re_adding_removed_name_starts_empty() {
    let mut db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);
    db.remove_initiative("Campaign X").unwrap();
    db.add_initiative("Campaign X", 10).unwrap();
    assert_eq!(db.total_for("Campaign X").unwrap(), 0);
}

// ── Actual store ──────────────────────────────────────────────

#[test]
fn test_upsert_replaces_not_adds() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();
    db.upsert_actual("Campaign X", period("2025-01"), 40_000)
        .unwrap();
    db.upsert_actual("Campaign X", period("2025-01"), 70_000)
        .unwrap();

    assert_eq!(db.total_for("Campaign X").unwrap(), 70_000);
    assert_eq!(db.get_actuals().unwrap().len(), 1);
    assert_eq!(
        db.amount_for("Campaign X", period("2025-01")).unwrap(),
        Some(70_000)
    );
}

#[test]
fn test_upsert_zero_amount_is_kept() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();
    db.upsert_actual("Campaign X", period("2025-01"), 0).unwrap();
    assert_eq!(
        db.amount_for("Campaign X", period("2025-01")).unwrap(),
        Some(0)
    );
}

#[test]
fn test_upsert_unknown_initiative_rejected() {
    let db = Database::open_in_memory().unwrap();
    let err = db
        .upsert_actual("Nobody", period("2025-01"), 100)
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(ref n) if n == "Nobody"));
    assert!(db.get_actuals().unwrap().is_empty());
}

#[test]
fn test_upsert_negative_amount_rejected() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", 100_000).unwrap();
    assert!(matches!(
        db.upsert_actual("Campaign X", period("2025-01"), -1),
        Err(LedgerError::InvalidInput(_))
    ));
}

#[test]
fn test_amount_for_missing_period() {
    let db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);
    assert_eq!(
        db.amount_for("Campaign X", period("2025-03")).unwrap(),
        None
    );
    assert_eq!(db.amount_for("Ghost", period("2025-01")).unwrap(), None);
}

#[test]
fn test_total_for_unknown_is_zero() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.total_for("Nothing here").unwrap(), 0);
}

#[test]
fn test_total_by_period_sorted_ascending() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("A", 1_000).unwrap();
    db.add_initiative("B", 1_000).unwrap();
    db.upsert_actual("A", period("2025-03"), 5).unwrap();
    db.upsert_actual("B", period("2024-12"), 7).unwrap();
    db.upsert_actual("A", period("2025-01"), 11).unwrap();
    db.upsert_actual("B", period("2025-01"), 13).unwrap();

    let totals: Vec<(String, i64)> = db
        .total_by_period()
        .unwrap()
        .into_iter()
        .map(|(p, t)| (p.to_string(), t))
        .collect();
    assert_eq!(
        totals,
        vec![
            ("2024-12".to_string(), 7),
            ("2025-01".to_string(), 24),
            ("2025-03".to_string(), 5),
        ]
    );
}

#[test]
fn test_delete_actuals_for() {
    let db = Database::open_in_memory().unwrap();
    setup_campaigns(&db);

    assert_eq!(db.delete_actuals_for("Campaign X").unwrap(), 2);
    assert_eq!(db.total_for("Campaign X").unwrap(), 0);
    // The initiative itself stays.
    assert!(db.find_initiative("Campaign X").unwrap().is_some());
    assert_eq!(db.delete_actuals_for("Unknown").unwrap(), 0);
}

#[test]
fn test_get_actuals_sorted_by_name_then_period() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Zed", 1_000).unwrap();
    db.add_initiative("Amy", 1_000).unwrap();
    db.upsert_actual("Zed", period("2025-01"), 1).unwrap();
    db.upsert_actual("Amy", period("2025-02"), 2).unwrap();
    db.upsert_actual("Amy", period("2024-11"), 3).unwrap();

    let keys: Vec<(String, String)> = db
        .get_actuals()
        .unwrap()
        .into_iter()
        .map(|a| (a.initiative_name, a.period.to_string()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("Amy".to_string(), "2024-11".to_string()),
            ("Amy".to_string(), "2025-02".to_string()),
            ("Zed".to_string(), "2025-01".to_string()),
        ]
    );
}

// ── File-backed storage ───────────────────────────────────────

#[test]
fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    {
        let db = Database::open(&path).unwrap();
        setup_campaigns(&db);
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_initiatives().unwrap().len(), 2);
    assert_eq!(db.total_for("Campaign X").unwrap(), 65_000);
}

#[test]
fn test_in_memory_databases_are_independent() {
    let a = Database::open_in_memory().unwrap();
    let b = Database::open_in_memory().unwrap();
    a.add_initiative("Only in A", 10).unwrap();
    assert!(b.get_initiatives().unwrap().is_empty());
}

#[test]
fn test_amounts_above_ceiling_rejected() {
    let mut db = Database::open_in_memory().unwrap();
    let err = db.add_initiative("Campaign X", MAX_AMOUNT + 1).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(db.get_initiatives().unwrap().is_empty());

    db.add_initiative("Campaign X", MAX_AMOUNT).unwrap();
    let err = db.set_budget("Campaign X", i64::MAX).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    let err = db.update_initiative("Campaign X", "Campaign Y", MAX_AMOUNT + 1).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert_eq!(db.find_initiative("Campaign X").unwrap().unwrap().budget, MAX_AMOUNT);

    let err = db.upsert_actual("Campaign X", period("2025-01"), i64::MAX).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidInput(_)));
    assert!(db.get_actuals().unwrap().is_empty());
}

#[test]
fn test_totals_at_ceiling_stay_exact() {
    let db = Database::open_in_memory().unwrap();
    db.add_initiative("Campaign X", MAX_AMOUNT).unwrap();
    db.add_initiative("Campaign Y", MAX_AMOUNT).unwrap();
    for name in ["Campaign X", "Campaign Y"] {
        db.upsert_actual(name, period("2025-01"), MAX_AMOUNT).unwrap();
        db.upsert_actual(name, period("2025-02"), MAX_AMOUNT).unwrap();
    }

    assert_eq!(db.total_for("Campaign X").unwrap(), 2 * MAX_AMOUNT);
    let by_period = db.total_by_period().unwrap();
    assert_eq!(by_period.len(), 2);
    assert!(by_period.iter().all(|(_, total)| *total == 2 * MAX_AMOUNT));

    let summaries = crate::summary::Ledger::load(&db).unwrap().summarize();
    let totals = crate::summary::overall_totals(&summaries);
    assert_eq!(totals.total_budget, 2 * MAX_AMOUNT);
    assert_eq!(totals.total_actual, 4 * MAX_AMOUNT);
    assert_eq!(totals.total_remaining, -2 * MAX_AMOUNT);
}

#[test]
fn test_period_round_trips_through_sqlite() {
    let db = Database::open_in_memory().unwrap();
    for text in ["2020-01", "2025-07", "2029-12"] {
        let p = period(text);
        let stored: String = db
            .conn
            .query_row("SELECT ?1", params![p], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, text);
        let back: YearMonth = db
            .conn
            .query_row("SELECT ?1", params![p], |row| row.get(0))
            .unwrap();
        assert_eq!(back, p);
    }
}

#[test]
fn test_period_decode_rejects_bad_text() {
    let db = Database::open_in_memory().unwrap();
    for text in ["2031-01", "garbage"] {
        let decoded = db
            .conn
            .query_row("SELECT ?1", params![text], |row| row.get::<_, YearMonth>(0));
        assert!(decoded.is_err());
    }
    let decoded = db
        .conn
        .query_row("SELECT 202501", [], |row| row.get::<_, YearMonth>(0));
    assert!(decoded.is_err());
}
