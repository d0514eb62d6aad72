mod schema;

use anyhow::{Context, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::models::*;

/// Both tables of the ledger behind one SQLite connection.
///
/// Initiatives carry a stable id; actuals reference that id, so renaming an
/// initiative never has to touch its actuals.
pub(crate) struct Database {
    conn: Connection,
}

impl ToSql for YearMonth {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for YearMonth {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: LedgerError| FromSqlError::Other(Box::new(e)))
    }
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::info!(path = %path.display(), "opened ledger database");
        Ok(db)
    }

    /// Session-only storage: everything is gone when the handle is dropped.
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::info!("opened in-memory ledger");
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Initiatives ───────────────────────────────────────────

    pub(crate) fn add_initiative(&self, name: &str, budget: i64) -> LedgerResult<Initiative> {
        let name = require_name(name)?;
        if budget <= 0 {
            return Err(LedgerError::InvalidInput(format!(
                "Budget must be greater than zero: {budget}"
            )));
        }
        check_ceiling("Budget", budget)?;
        if find_initiative_in(&self.conn, name)?.is_some() {
            tracing::debug!(name, "refused duplicate initiative");
            return Err(LedgerError::DuplicateName(name.to_string()));
        }

        self.conn.execute(
            "INSERT INTO initiatives (name, budget) VALUES (?1, ?2)",
            params![name, budget],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, name, budget, "added initiative");
        Ok(Initiative {
            id,
            name: name.to_string(),
            budget,
        })
    }

    /// All initiatives in the order they were added.
    pub(crate) fn get_initiatives(&self) -> LedgerResult<Vec<Initiative>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, budget FROM initiatives ORDER BY id")?;
        let rows = stmt.query_map([], initiative_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn find_initiative(&self, name: &str) -> LedgerResult<Option<Initiative>> {
        Ok(find_initiative_in(&self.conn, name)?)
    }

    /// Renaming to the current name is accepted and changes nothing.
    pub(crate) fn rename_initiative(&mut self, old_name: &str, new_name: &str) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        rename_in(&tx, old_name, new_name)?;
        tx.commit()?;
        Ok(())
    }

    pub(crate) fn set_budget(&self, name: &str, budget: i64) -> LedgerResult<()> {
        set_budget_in(&self.conn, name, budget)
    }

    /// Name and budget edited together; either both apply or neither does.
    pub(crate) fn update_initiative(
        &mut self,
        old_name: &str,
        new_name: &str,
        budget: i64,
    ) -> LedgerResult<()> {
        let tx = self.conn.transaction()?;
        rename_in(&tx, old_name, new_name)?;
        set_budget_in(&tx, require_name(new_name)?, budget)?;
        tx.commit()?;
        Ok(())
    }

    /// Deletes the initiative together with all of its actuals. Returns how
    /// many actuals went with it.
    pub(crate) fn remove_initiative(&mut self, name: &str) -> LedgerResult<usize> {
        let tx = self.conn.transaction()?;
        let initiative = require_initiative(&tx, name)?;
        let removed = delete_actuals_in(&tx, initiative.id)?;
        tx.execute(
            "DELETE FROM initiatives WHERE id = ?1",
            params![initiative.id],
        )?;
        tx.commit()?;
        tracing::info!(name, removed, "removed initiative");
        Ok(removed)
    }

    // ── Actuals ───────────────────────────────────────────────

    /// Records the amount for an initiative and month, replacing any amount
    /// already recorded for that pair.
    pub(crate) fn upsert_actual(
        &self,
        name: &str,
        period: YearMonth,
        amount: i64,
    ) -> LedgerResult<()> {
        if amount < 0 {
            return Err(LedgerError::InvalidInput(format!(
                "Amount must not be negative: {amount}"
            )));
        }
        check_ceiling("Amount", amount)?;
        let initiative = require_initiative(&self.conn, name)?;
        self.conn.execute(
            "INSERT INTO actuals (initiative_id, period, amount)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(initiative_id, period) DO UPDATE SET amount = excluded.amount",
            params![initiative.id, period, amount],
        )?;
        tracing::info!(name, %period, amount, "saved actual");
        Ok(())
    }

    /// Removes every actual of the named initiative. Unknown names remove
    /// nothing.
    pub(crate) fn delete_actuals_for(&self, name: &str) -> LedgerResult<usize> {
        match find_initiative_in(&self.conn, name)? {
            Some(initiative) => delete_actuals_in(&self.conn, initiative.id),
            None => Ok(0),
        }
    }

    /// Sum over all months; 0 when nothing is recorded or the name is unknown.
    pub(crate) fn total_for(&self, name: &str) -> LedgerResult<i64> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(a.amount), 0)
             FROM actuals a JOIN initiatives i ON a.initiative_id = i.id
             WHERE i.name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    pub(crate) fn total_by_period(&self) -> LedgerResult<BTreeMap<YearMonth, i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT period, SUM(amount) FROM actuals GROUP BY period")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, YearMonth>(0)?, row.get::<_, i64>(1)?))
        })?;
        Ok(rows.collect::<std::result::Result<BTreeMap<_, _>, _>>()?)
    }

    pub(crate) fn amount_for(&self, name: &str, period: YearMonth) -> LedgerResult<Option<i64>> {
        let amount = self
            .conn
            .query_row(
                "SELECT a.amount
                 FROM actuals a JOIN initiatives i ON a.initiative_id = i.id
                 WHERE i.name = ?1 AND a.period = ?2",
                params![name, period],
                |row| row.get(0),
            )
            .optional()?;
        Ok(amount)
    }

    /// All actuals, ordered by initiative name and then month.
    pub(crate) fn get_actuals(&self) -> LedgerResult<Vec<ActualEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.initiative_id, i.name, a.period, a.amount
             FROM actuals a JOIN initiatives i ON a.initiative_id = i.id
             ORDER BY i.name, a.period",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ActualEntry {
                initiative_id: row.get(0)?,
                initiative_name: row.get(1)?,
                period: row.get(2)?,
                amount: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

// ── Helpers shared by plain and transactional calls ──────────

fn initiative_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Initiative> {
    Ok(Initiative {
        id: row.get(0)?,
        name: row.get(1)?,
        budget: row.get(2)?,
    })
}

fn require_name(name: &str) -> LedgerResult<&str> {
    Initiative::valid_name(name)
        .ok_or_else(|| LedgerError::InvalidInput("Initiative name must not be empty".into()))
}

fn check_ceiling(what: &str, value: i64) -> LedgerResult<()> {
    if value > MAX_AMOUNT {
        return Err(LedgerError::InvalidInput(format!(
            "{what} must not exceed {MAX_AMOUNT}: {value}"
        )));
    }
    Ok(())
}

fn find_initiative_in(conn: &Connection, name: &str) -> rusqlite::Result<Option<Initiative>> {
    conn.query_row(
        "SELECT id, name, budget FROM initiatives WHERE name = ?1",
        params![name],
        initiative_from_row,
    )
    .optional()
}

fn require_initiative(conn: &Connection, name: &str) -> LedgerResult<Initiative> {
    find_initiative_in(conn, name)?.ok_or_else(|| LedgerError::NotFound(name.to_string()))
}

fn rename_in(conn: &Connection, old_name: &str, new_name: &str) -> LedgerResult<()> {
    let new_name = require_name(new_name)?;
    let current = require_initiative(conn, old_name)?;

    if let Some(existing) = find_initiative_in(conn, new_name)? {
        if existing.id != current.id {
            tracing::debug!(old_name, new_name, "refused rename onto existing initiative");
            return Err(LedgerError::DuplicateName(new_name.to_string()));
        }
        return Ok(());
    }

    conn.execute(
        "UPDATE initiatives SET name = ?1 WHERE id = ?2",
        params![new_name, current.id],
    )?;
    tracing::info!(id = current.id, old_name, new_name, "renamed initiative");
    Ok(())
}

fn set_budget_in(conn: &Connection, name: &str, budget: i64) -> LedgerResult<()> {
    if budget < 0 {
        return Err(LedgerError::InvalidInput(format!(
            "Budget must not be negative: {budget}"
        )));
    }
    check_ceiling("Budget", budget)?;
    let changed = conn.execute(
        "UPDATE initiatives SET budget = ?1 WHERE name = ?2",
        params![budget, name],
    )?;
    if changed == 0 {
        return Err(LedgerError::NotFound(name.to_string()));
    }
    tracing::info!(name, budget, "set budget");
    Ok(())
}

fn delete_actuals_in(conn: &Connection, initiative_id: i64) -> LedgerResult<usize> {
    let removed = conn.execute(
        "DELETE FROM actuals WHERE initiative_id = ?1",
        params![initiative_id],
    )?;
    Ok(removed)
}

#[cfg(test)]
mod tests;
