pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS initiatives (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL UNIQUE,
    budget  INTEGER NOT NULL CHECK (budget >= 0)
);

CREATE TABLE IF NOT EXISTS actuals (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    initiative_id  INTEGER NOT NULL REFERENCES initiatives(id),
    period         TEXT NOT NULL,
    amount         INTEGER NOT NULL CHECK (amount >= 0),
    UNIQUE(initiative_id, period)
);

CREATE INDEX IF NOT EXISTS idx_actuals_period ON actuals(period);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
