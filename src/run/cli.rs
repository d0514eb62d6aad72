use anyhow::{Context, Result};
use std::path::Path;

use crate::db::Database;
use crate::models::YearMonth;
use crate::summary::{self, Ledger};
use crate::ui::util::{format_rate, format_yen, parse_amount, split_trailing_amount};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], db),
        "record" | "r" => cli_record(&args[2..], db),
        "rename" => cli_rename(&args[2..], db),
        "budget" => cli_budget(&args[2..], db),
        "remove" => cli_remove(&args[2..], db),
        "summary" | "s" => cli_summary(db),
        "monthly" | "m" => cli_monthly(db),
        "export" => cli_export(&args[2..], db),
        "export-summary" => cli_export_summary(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("yojitsu {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Yojitsu: budget vs. actual tracking per initiative");
    println!();
    println!("Usage: yojitsu [--db <file>] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                           Launch interactive TUI");
    println!("  add <name> <budget>              Register an initiative");
    println!("  record <name> <YYYY-MM> <amount> Save the actual for a month");
    println!("  rename <old> --to <new>          Rename an initiative");
    println!("  budget <name> <amount>           Change an initiative's budget");
    println!("  remove <name>                    Delete an initiative and its actuals");
    println!("  summary                          Print budget vs. actual per initiative");
    println!("  monthly                          Print actual totals per month");
    println!("  export [path]                    Export actuals to CSV");
    println!("  export-summary [path]            Export the summary table to CSV");
    println!("  --help, -h                       Show this help");
    println!("  --version, -V                    Show version");
    println!();
    println!("Without --db the data lives in memory and is gone when the command exits.");
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    let joined = args.join(" ");
    let Some((name, budget)) = split_trailing_amount(&joined) else {
        anyhow::bail!("Usage: yojitsu add <name> <budget>");
    };
    let added = db.add_initiative(name, budget)?;
    println!("Added '{}' with budget {}", added.name, format_yen(added.budget));
    Ok(())
}

fn cli_record(args: &[String], db: &mut Database) -> Result<()> {
    let [name @ .., period, amount] = args else {
        anyhow::bail!("Usage: yojitsu record <name> <YYYY-MM> <amount>");
    };
    if name.is_empty() {
        anyhow::bail!("Usage: yojitsu record <name> <YYYY-MM> <amount>");
    }
    let name = name.join(" ");
    let period: YearMonth = period.parse()?;
    let amount =
        parse_amount(amount).with_context(|| format!("Invalid amount: {amount}"))?;

    db.upsert_actual(&name, period, amount)?;
    let total = db.total_for(&name)?;
    println!("Saved {} for '{name}' in {period}", format_yen(amount));

    if let Some(initiative) = db.find_initiative(&name)? {
        let rate = summary::consumption_rate(total, initiative.budget);
        println!(
            "  Total {} of {} ({})",
            format_yen(total),
            format_yen(initiative.budget),
            format_rate(rate)
        );
    }
    Ok(())
}

fn cli_rename(args: &[String], db: &mut Database) -> Result<()> {
    let Some(split) = args.iter().position(|a| a == "--to") else {
        anyhow::bail!("Usage: yojitsu rename <old> --to <new>");
    };
    let old_name = args[..split].join(" ");
    let new_name = args[split + 1..].join(" ");
    db.rename_initiative(&old_name, &new_name)?;
    println!("Renamed '{old_name}' to '{new_name}'");
    Ok(())
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    let joined = args.join(" ");
    let Some((name, budget)) = split_trailing_amount(&joined) else {
        anyhow::bail!("Usage: yojitsu budget <name> <amount>");
    };
    db.set_budget(name, budget)?;
    println!("Budget for '{name}' set to {}", format_yen(budget));
    Ok(())
}

fn cli_remove(args: &[String], db: &mut Database) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: yojitsu remove <name>");
    }
    let name = args.join(" ");
    let removed = db.remove_initiative(&name)?;
    println!("Deleted '{name}' and {removed} actual(s)");
    Ok(())
}

fn cli_summary(db: &mut Database) -> Result<()> {
    let ledger = Ledger::load(db)?;
    let summaries = ledger.summarize();
    if summaries.is_empty() {
        println!("No initiatives");
        return Ok(());
    }

    println!(
        "{:<24} {:>14} {:>14} {:>14} {:>8}  Band",
        "Initiative", "Budget", "Actual", "Remaining", "Rate"
    );
    println!("{}", "─".repeat(88));
    for s in &summaries {
        println!(
            "{:<24} {:>14} {:>14} {:>14} {:>8}  {}",
            s.name,
            format_yen(s.budget),
            format_yen(s.total_actual),
            format_yen(s.remaining),
            format_rate(s.consumption_rate),
            summary::progress_band(s.consumption_rate),
        );
    }

    let totals = summary::overall_totals(&summaries);
    println!("{}", "─".repeat(88));
    println!(
        "{:<24} {:>14} {:>14} {:>14} {:>8}",
        "Total",
        format_yen(totals.total_budget),
        format_yen(totals.total_actual),
        format_yen(totals.total_remaining),
        format_rate(totals.overall_rate),
    );
    Ok(())
}

fn cli_monthly(db: &mut Database) -> Result<()> {
    let totals = db.total_by_period()?;
    if totals.is_empty() {
        println!("No actuals");
        return Ok(());
    }

    println!("{:<8} {:>14}", "Period", "Total");
    println!("{}", "─".repeat(23));
    for (period, total) in &totals {
        println!("{period:<8} {:>14}", format_yen(*total));
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let output_path = output_path(args, "actuals");
    let ledger = Ledger::load(db)?;
    let count = crate::export::write_detail_csv(Path::new(&output_path), &ledger)?;
    if count == 0 {
        println!("No actuals; wrote header only to {output_path}");
    } else {
        println!("Exported {count} actual(s) to {output_path}");
    }
    Ok(())
}

fn cli_export_summary(args: &[String], db: &mut Database) -> Result<()> {
    let output_path = output_path(args, "summary");
    let summaries = Ledger::load(db)?.summarize();
    let count = crate::export::write_summary_csv(Path::new(&output_path), &summaries)?;
    println!("Exported {count} initiative(s) to {output_path}");
    Ok(())
}

fn output_path(args: &[String], kind: &str) -> String {
    args.first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| crate::export::shellexpand(a))
        .unwrap_or_else(|| crate::export::default_export_path(kind))
}
