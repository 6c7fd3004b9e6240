use anyhow::{Context, Result};
use chrono::Datelike;
use std::fmt::Display;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::LedgerError;
use crate::models::{parse_date, Expense, NewExpense};
use crate::query::{self, Bucket, CategoryTotal, ExpenseFilter};
use crate::store::ExpenseStore;
use crate::ui::util::{bar, format_amount, truncate};

const CHART_WIDTH: usize = 40;

pub(crate) fn as_cli(args: &[String], store: &ExpenseStore) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest = &args[2..];
    match command.as_str() {
        "add" => cli_add(rest, store),
        "view" | "ls" => cli_view(rest, store),
        "delete" | "rm" => cli_delete(rest, store),
        "summary" | "s" => cli_summary(rest, store),
        "plot" => cli_plot(rest, store),
        "export" => cli_export(rest, store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledger {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

/// Pull a global `--file <path>` out of the arguments before dispatch.
/// Only flags ahead of the subcommand count; later ones belong to it.
pub(crate) fn split_file_flag(args: Vec<String>) -> (Vec<String>, Option<PathBuf>) {
    let mut iter = args.into_iter();
    let mut rest: Vec<String> = iter.next().into_iter().collect();
    let mut file = None;
    while let Some(arg) = iter.next() {
        if arg == "--file" {
            file = iter.next().map(PathBuf::from);
        } else {
            rest.push(arg);
            break;
        }
    }
    rest.extend(iter);
    (rest, file)
}

fn print_usage() {
    println!("ledger — personal expense ledger");
    println!();
    println!("Usage: ledger [--file <path>] <command> [flags]");
    println!();
    println!("Commands:");
    println!("  add                           Record an expense");
    println!("    --date <YYYY-MM-DD> --category <name> --amount <n>");
    println!("    [--currency <code>] [--payment_method <text>] [--notes <text>]");
    println!("  view                          List expenses, newest first");
    println!("    [--from <YYYY-MM-DD>] [--to <YYYY-MM-DD>] [--category <name>] [--limit <n>]");
    println!("  delete --id <id>              Delete an expense");
    println!("  summary [--year <y>] [--month <m>]");
    println!("                                Totals by category (default: current year)");
    println!("  plot [--year <y>] [--month <m>]");
    println!("                                Bar chart of daily/monthly totals");
    println!("  export --out <path>           Copy every expense to another CSV file");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

// ── Flag helpers ─────────────────────────────────────────────

fn flag<'a>(args: &'a [String], names: &[&str]) -> Option<&'a str> {
    args.windows(2)
        .find(|w| names.contains(&w[0].as_str()))
        .map(|w| w[1].as_str())
}

fn required<'a>(args: &'a [String], name: &str) -> Result<&'a str> {
    flag(args, &[name]).ok_or_else(|| anyhow::anyhow!("Missing required flag {name}"))
}

fn parsed<T>(args: &[String], name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    flag(args, &[name])
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow::anyhow!("Invalid value for {name} '{raw}': {e}"))
        })
        .transpose()
}

fn parsed_month(args: &[String]) -> Result<Option<u32>> {
    let month = parsed::<u32>(args, "--month")?;
    if let Some(m) = month.filter(|m| !(1..=12).contains(m)) {
        anyhow::bail!("Month must be between 1 and 12, got {m}");
    }
    Ok(month)
}

// ── Commands ─────────────────────────────────────────────────

fn cli_add(args: &[String], store: &ExpenseStore) -> Result<()> {
    let input = NewExpense {
        currency: flag(args, &["--currency"]).unwrap_or_default().to_string(),
        payment_method: flag(args, &["--payment_method", "--payment-method"])
            .unwrap_or_default()
            .to_string(),
        notes: flag(args, &["--notes"]).unwrap_or_default().to_string(),
        ..NewExpense::new(
            required(args, "--date")?.to_string(),
            required(args, "--category")?.to_string(),
            required(args, "--amount")?.to_string(),
        )
    };
    let id = store.append(&input)?;
    println!("Added expense with id: {id}");
    Ok(())
}

fn cli_view(args: &[String], store: &ExpenseStore) -> Result<()> {
    let criteria = ExpenseFilter {
        from: flag(args, &["--from"]).map(parse_date).transpose()?,
        to: flag(args, &["--to"]).map(parse_date).transpose()?,
        category: flag(args, &["--category"]).map(str::to_string),
        limit: parsed::<usize>(args, "--limit")?,
    };
    let expenses = query::filter(&store.load()?, &criteria);
    if expenses.is_empty() {
        println!("No expenses found.");
    } else {
        print!("{}", render_table(&expenses));
    }
    Ok(())
}

fn cli_delete(args: &[String], store: &ExpenseStore) -> Result<()> {
    let id = required(args, "--id")?;
    if store.delete(id)? {
        println!("Deleted.");
    } else {
        println!("Expense not found.");
    }
    Ok(())
}

fn cli_summary(args: &[String], store: &ExpenseStore) -> Result<()> {
    let year = parsed::<i32>(args, "--year")?.unwrap_or_else(|| chrono::Local::now().year());
    let month = parsed_month(args)?;
    match query::summarize(&store.load()?, year, month).require_data() {
        Ok((categories, grand_total)) => print!("{}", render_summary(&categories, grand_total)),
        Err(LedgerError::EmptyResult(_)) => println!("No data found."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn cli_plot(args: &[String], store: &ExpenseStore) -> Result<()> {
    let year = parsed::<i32>(args, "--year")?;
    let month = parsed_month(args)?;
    match query::bucket_for_chart(&store.load()?, year, month) {
        Ok(buckets) => print!("{}", render_chart(&buckets)),
        Err(LedgerError::EmptyResult(_)) => println!("No data to plot."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn cli_export(args: &[String], store: &ExpenseStore) -> Result<()> {
    let out = shellexpand(required(args, "--out")?);
    if same_file(Path::new(&out), store.path()) {
        anyhow::bail!("Refusing to export onto the store file itself: {out}");
    }
    let count = store
        .export(Path::new(&out))
        .with_context(|| format!("Failed to export to {out}"))?;
    println!("Exported {count} expenses to {out}");
    Ok(())
}

/// Compare paths after resolving `.`, `..` and symlinks. `a` may not exist yet.
fn same_file(a: &Path, b: &Path) -> bool {
    match (resolve(a), resolve(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}

fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(full) = path.canonicalize() {
        return Some(full);
    }
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Some(parent.canonicalize().ok()?.join(path.file_name()?))
}

// ── Rendering ────────────────────────────────────────────────

pub(crate) fn render_table(expenses: &[Expense]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:<16} {:>12} {:<4} {:<10} {:<24} ID",
        "Date", "Category", "Amount", "Cur", "Payment", "Notes"
    );
    let _ = writeln!(out, "{}", "─".repeat(120));
    for e in expenses {
        let _ = writeln!(
            out,
            "{:<10}  {:<16} {:>12} {:<4} {:<10} {:<24} {}",
            e.date,
            truncate(&e.category, 16),
            format_amount(e.amount),
            truncate(&e.currency, 4),
            truncate(&e.payment_method, 10),
            truncate(&e.notes.replace('\n', " "), 24),
            e.id,
        );
    }
    let _ = writeln!(out, "{}", "─".repeat(120));
    let _ = writeln!(
        out,
        "{} expense(s), total {}",
        expenses.len(),
        format_amount(query::total(expenses))
    );
    out
}

pub(crate) fn render_summary(categories: &[CategoryTotal], grand_total: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<24} {:>14}", "Category", "Amount");
    for c in categories {
        let _ = writeln!(
            out,
            "{:<24} {:>14}",
            truncate(&c.category, 24),
            format_amount(c.total)
        );
    }
    let _ = writeln!(out, "----");
    let _ = writeln!(out, "Total: {}", format_amount(grand_total));
    out
}

pub(crate) fn render_chart(buckets: &[Bucket]) -> String {
    let max_abs = buckets.iter().map(|b| b.total.abs()).fold(0.0, f64::max);
    let mut out = String::new();
    for b in buckets {
        let _ = writeln!(
            out,
            "{:>7} │{:<width$} {}",
            b.label(),
            bar(b.total, max_abs, CHART_WIDTH),
            format_amount(b.total),
            width = CHART_WIDTH,
        );
    }
    out
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
