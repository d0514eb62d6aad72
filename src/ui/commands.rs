use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, EditTarget, PendingAction, Screen};
use super::util::{format_yen, parse_amount, split_trailing_amount};
use crate::db::Database;
use crate::error::LedgerResult;
use crate::models::YearMonth;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Yojitsu", cmd_quit, r);
    register_command!("quit", "Quit Yojitsu", cmd_quit, r);
    register_command!("i", "Go to Initiatives", cmd_initiatives, r);
    register_command!("initiatives", "Go to Initiatives", cmd_initiatives, r);
    register_command!("a", "Go to Actuals", cmd_actuals, r);
    register_command!("actuals", "Go to Actuals", cmd_actuals, r);
    register_command!("d", "Go to Data", cmd_data, r);
    register_command!("data", "Go to Data", cmd_data, r);
    register_command!("c", "Go to Charts", cmd_charts, r);
    register_command!("charts", "Go to Charts", cmd_charts, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add initiative (e.g. :add Campaign X 100000)",
        cmd_add,
        r
    );
    register_command!(
        "rename",
        "Rename selected initiative (e.g. :rename Campaign Y)",
        cmd_rename,
        r
    );
    register_command!(
        "budget",
        "Set budget of selected initiative (e.g. :budget 120000)",
        cmd_budget,
        r
    );
    register_command!(
        "set-budget",
        "Set budget of selected initiative (e.g. :set-budget 120000)",
        cmd_budget,
        r
    );
    register_command!(
        "update",
        "Rename and re-budget selected (e.g. :update Campaign Y 120000)",
        cmd_update,
        r
    );
    register_command!(
        "delete",
        "Delete selected initiative and its actuals",
        cmd_delete,
        r
    );
    register_command!(
        "save",
        "Save actual for selected initiative (e.g. :save 40000)",
        cmd_save,
        r
    );
    register_command!(
        "clear-actuals",
        "Delete every actual of selected initiative",
        cmd_clear_actuals,
        r
    );
    register_command!("p", "Set period (e.g. :p 2025-01)", cmd_period, r);
    register_command!("period", "Set period (e.g. :period 2025-01)", cmd_period, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!("tab", "Cycle Data view (initiative/monthly/detail)", cmd_tab, r);
    register_command!(
        "export",
        "Export actuals to CSV (e.g. :export ~/actuals.csv)",
        cmd_export,
        r
    );
    register_command!(
        "export-summary",
        "Export initiative summary to CSV",
        cmd_export_summary,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Turn a refusal into a status message. Only storage failures escape.
fn settle<T>(app: &mut App, result: LedgerResult<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_user_error() => {
            app.set_status(e.to_string());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

const NOTHING_SELECTED: &str = "No initiative selected. Add one with :add <name> <budget>";

fn selected_name(app: &mut App) -> Option<String> {
    let name = app.selected_initiative().map(|i| i.name.clone());
    if name.is_none() {
        app.set_status(NOTHING_SELECTED);
    }
    name
}

// ── Ledger operations shared with the inline editor ─────────

pub(crate) fn add_initiative(
    app: &mut App,
    db: &mut Database,
    name: &str,
    budget: i64,
) -> anyhow::Result<()> {
    if let Some(added) = settle(app, db.add_initiative(name, budget))? {
        app.refresh(db)?;
        app.initiative_index = app.ledger.initiatives.len().saturating_sub(1);
        app.set_status(format!(
            "Added initiative '{}' ({})",
            added.name,
            format_yen(added.budget)
        ));
    }
    Ok(())
}

pub(crate) fn rename_initiative(
    app: &mut App,
    db: &mut Database,
    old_name: &str,
    new_name: &str,
) -> anyhow::Result<()> {
    if settle(app, db.rename_initiative(old_name, new_name))?.is_some() {
        app.refresh(db)?;
        app.set_status(format!("Renamed '{old_name}' to '{new_name}'"));
    }
    Ok(())
}

pub(crate) fn set_budget(
    app: &mut App,
    db: &mut Database,
    name: &str,
    budget: i64,
) -> anyhow::Result<()> {
    if settle(app, db.set_budget(name, budget))?.is_some() {
        app.refresh(db)?;
        app.set_status(format!("Budget for '{name}' set to {}", format_yen(budget)));
    }
    Ok(())
}

pub(crate) fn save_actual(
    app: &mut App,
    db: &mut Database,
    name: &str,
    period: YearMonth,
    amount: i64,
) -> anyhow::Result<()> {
    if settle(app, db.upsert_actual(name, period, amount))?.is_some() {
        app.refresh(db)?;
        app.set_status(format!(
            "Saved {} for '{name}' in {period}",
            format_yen(amount)
        ));
    }
    Ok(())
}

pub(crate) fn remove_initiative(app: &mut App, db: &mut Database, name: &str) -> anyhow::Result<()> {
    if let Some(removed) = settle(app, db.remove_initiative(name))? {
        app.refresh(db)?;
        app.set_status(format!(
            "Deleted '{name}' and {removed} actual(s)"
        ));
    }
    Ok(())
}

pub(crate) fn clear_actuals(app: &mut App, db: &mut Database, name: &str) -> anyhow::Result<()> {
    if let Some(removed) = settle(app, db.delete_actuals_for(name))? {
        app.refresh(db)?;
        app.set_status(format!("Cleared {removed} actual(s) of '{name}'"));
    }
    Ok(())
}

/// Open the inline editor on the selected initiative's amount for the
/// current period, pre-filled with what is recorded.
pub(crate) fn begin_amount_edit(app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    let period = app.period;
    let current = settle(app, db.amount_for(&name, period))?.flatten().unwrap_or(0);
    app.begin_edit(EditTarget::Amount { name, period }, current.to_string());
    Ok(())
}

pub(crate) fn begin_name_edit(app: &mut App) {
    if let Some(name) = selected_name(app) {
        app.begin_edit(EditTarget::Name { name: name.clone() }, name);
    }
}

pub(crate) fn begin_budget_edit(app: &mut App) {
    if let Some(initiative) = app.selected_initiative().cloned() {
        app.begin_edit(
            EditTarget::Budget {
                name: initiative.name,
            },
            initiative.budget.to_string(),
        );
    } else {
        app.set_status(NOTHING_SELECTED);
    }
}

/// Apply what was typed in the inline editor.
pub(crate) fn commit_edit(
    target: EditTarget,
    input: &str,
    app: &mut App,
    db: &mut Database,
) -> anyhow::Result<()> {
    match target {
        EditTarget::Name { name } => rename_initiative(app, db, &name, input),
        EditTarget::Budget { name } => match parse_amount(input) {
            Some(budget) => set_budget(app, db, &name, budget),
            None => {
                app.set_status(format!("Invalid budget: {input}"));
                Ok(())
            }
        },
        EditTarget::Amount { name, period } => match parse_amount(input) {
            Some(amount) => save_actual(app, db, &name, period, amount),
            None => {
                app.set_status(format!("Invalid amount: {input}"));
                Ok(())
            }
        },
    }
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_initiatives(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Initiatives;
    Ok(())
}

fn cmd_actuals(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Actuals;
    if app.ledger.initiatives.is_empty() {
        app.set_status("Register an initiative first (:add <name> <budget>)");
    }
    Ok(())
}

fn cmd_data(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Data;
    Ok(())
}

fn cmd_charts(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Charts;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <name> <budget>. Example: :add Campaign X 100000");
        return Ok(());
    }

    // Last token is the budget, everything before is the name
    let Some((name, budget)) = split_trailing_amount(args) else {
        app.set_status("Enter an initiative name and a whole-yen budget: :add <name> <budget>");
        return Ok(());
    };
    add_initiative(app, db, name, budget)
}

fn cmd_rename(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :rename <new name>");
        return Ok(());
    }
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    rename_initiative(app, db, &name, args)
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(budget) = parse_amount(args) else {
        app.set_status("Usage: :budget <amount>. Example: :budget 120000");
        return Ok(());
    };
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    set_budget(app, db, &name, budget)
}

fn cmd_update(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some((new_name, budget)) = split_trailing_amount(args) else {
        app.set_status("Usage: :update <name> <budget>");
        return Ok(());
    };
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    if settle(app, db.update_initiative(&name, new_name, budget))?.is_some() {
        app.refresh(db)?;
        app.set_status(format!(
            "Updated '{new_name}' ({})",
            format_yen(budget)
        ));
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    let count = app.ledger.entries_for(&name).count();
    app.request_confirm(
        PendingAction::DeleteInitiative { name: name.clone() },
        format!("Delete '{name}' and its {count} actual(s)?"),
    );
    Ok(())
}

fn cmd_clear_actuals(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    let count = app.ledger.entries_for(&name).count();
    if count == 0 {
        app.set_status(format!("'{name}' has no actuals"));
        return Ok(());
    }
    app.request_confirm(
        PendingAction::ClearActuals { name: name.clone() },
        format!("Delete all {count} actual(s) of '{name}'?"),
    );
    Ok(())
}

fn cmd_save(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(amount) = parse_amount(args) else {
        app.set_status("Usage: :save <amount>. Example: :save 40000");
        return Ok(());
    };
    let Some(name) = selected_name(app) else {
        return Ok(());
    };
    let period = app.period;
    save_actual(app, db, &name, period, amount)
}

fn cmd_period(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_period(YearMonth::current());
        app.set_status(format!("Period: {}", app.period));
        return Ok(());
    }

    // Accept "2025-01", "2025-1", or a bare month number in the current year
    let input = if args.len() <= 2 {
        format!("{}-{args}", app.period.year())
    } else {
        args.to_string()
    };

    match input.parse::<YearMonth>() {
        Ok(period) => {
            app.set_period(period);
            app.set_status(format!("Period: {period}"));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    match app.period.next() {
        Some(next) => {
            app.set_period(next);
            app.set_status(format!("Period: {next}"));
        }
        None => app.set_status(format!("{} is the last supported month", app.period)),
    }
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    match app.period.prev() {
        Some(prev) => {
            app.set_period(prev);
            app.set_status(format!("Period: {prev}"));
        }
        None => app.set_status(format!("{} is the first supported month", app.period)),
    }
    Ok(())
}

fn cmd_tab(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Data;
    app.next_data_tab();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = export_path(args, "actuals");
    match crate::export::write_detail_csv(Path::new(&path), &app.ledger) {
        Ok(0) => app.set_status(format!("No actuals yet; wrote header only to {path}")),
        Ok(count) => app.set_status(format!("Exported {count} actual(s) to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

fn cmd_export_summary(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = export_path(args, "summary");
    match crate::export::write_summary_csv(Path::new(&path), &app.summaries) {
        Ok(count) => app.set_status(format!("Exported {count} initiative(s) to {path}")),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
    Ok(())
}

fn export_path(args: &str, kind: &str) -> String {
    if args.is_empty() {
        crate::export::default_export_path(kind)
    } else {
        crate::export::shellexpand(args)
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
