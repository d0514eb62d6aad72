use anyhow::{Context, Result};
use std::path::Path;

use crate::summary::{InitiativeSummary, Ledger};

/// Write every actual as `initiative,period,amount`, ordered by initiative
/// name and month. Returns the number of data rows written.
pub(crate) fn write_detail_csv(path: &Path, ledger: &Ledger) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(["initiative", "period", "amount"])?;

    let rows = ledger.detail_rows();
    for entry in rows {
        wtr.write_record([
            entry.initiative_name.clone(),
            entry.period.to_string(),
            entry.amount.to_string(),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV")?;
    tracing::info!(path = %path.display(), rows = rows.len(), "exported actuals");
    Ok(rows.len())
}

/// Write the per-initiative summary table.
pub(crate) fn write_summary_csv(path: &Path, summaries: &[InitiativeSummary]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    wtr.write_record(["initiative", "budget", "actual", "remaining", "rate"])?;

    for s in summaries {
        wtr.write_record([
            s.name.clone(),
            s.budget.to_string(),
            s.total_actual.to_string(),
            s.remaining.to_string(),
            format!("{:.1}", s.consumption_rate),
        ])?;
    }
    wtr.flush().context("Failed to flush CSV")?;
    tracing::info!(path = %path.display(), rows = summaries.len(), "exported summary");
    Ok(summaries.len())
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// Default export location when no path is given.
pub(crate) fn default_export_path(kind: &str) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    let stamp = chrono::Local::now().format("%Y%m%d");
    format!("{home}/yojitsu-{kind}-{stamp}.csv")
}

#[cfg(test)]
mod tests;
