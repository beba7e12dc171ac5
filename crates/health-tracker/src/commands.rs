//! Command handlers shared by the subcommands and the interactive menu.
//!
//! Everything here writes to a caller-supplied `Write` and reads from a
//! `BufRead`, so the binary passes stdin/stdout and tests pass buffers.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{info, warn};

use health_core::formatting;
use health_core::models::{HealthEntry, Period};
use health_core::settings::AddArgs;
use health_data::aggregator::{EntryTotals, PeriodAggregator, PeriodAverages};
use health_data::store::RecordStore;
use health_ui::table_view::{average_cells, total_cells, AVERAGE_HEADERS};

use crate::prompt;

/// Averages for `period` plus the overall totals across every entry.
pub struct Report {
    pub period: Period,
    pub averages: Vec<PeriodAverages>,
    pub totals: EntryTotals,
}

impl Report {
    pub fn build(entries: &[HealthEntry], period: Period) -> Self {
        let grouped = PeriodAggregator::aggregate(entries, period);
        let totals = PeriodAggregator::calculate_totals(&grouped);
        let averages = grouped.iter().map(|p| p.averages()).collect();
        Self {
            period,
            averages,
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

// ── add ────────────────────────────────────────────────────────────────────────

pub fn add_entry<R: BufRead, W: Write>(
    store: &RecordStore,
    args: AddArgs,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let entry = prompt::collect_entry(args, input, output)?;
    let date = entry.date;
    let count = store.append(entry)?;
    info!("Stored entry for {} ({} total)", date, count);
    writeln!(output, "Data saved.")?;
    Ok(())
}

// ── list ───────────────────────────────────────────────────────────────────────

/// One record as a single text line.
pub fn format_record(entry: &HealthEntry) -> String {
    format!(
        "{}  steps {:>8}  sleep {:>8}  calories {:>7}  water {:>8}",
        entry.date,
        formatting::format_count(entry.steps),
        formatting::format_measure(entry.sleep_hours, "h"),
        formatting::format_count(entry.calories),
        formatting::format_measure(entry.water_liters, "L"),
    )
}

pub fn print_records<W: Write>(entries: &[HealthEntry], output: &mut W) -> Result<()> {
    if entries.is_empty() {
        writeln!(output, "No records found.")?;
        return Ok(());
    }
    for entry in entries {
        writeln!(output, "{}", format_record(entry))?;
    }
    Ok(())
}

pub fn list_records<W: Write>(store: &RecordStore, output: &mut W) -> Result<()> {
    let entries = store.load()?;
    print_records(&entries, output)
}

// ── report ─────────────────────────────────────────────────────────────────────

/// Print the averages table as aligned plain text, TOTAL row last.
pub fn print_report<W: Write>(report: &Report, output: &mut W) -> Result<()> {
    if report.is_empty() {
        writeln!(output, "No records found.")?;
        return Ok(());
    }

    let mut rows: Vec<[String; 6]> = Vec::with_capacity(report.averages.len() + 2);
    rows.push(AVERAGE_HEADERS.map(String::from));
    rows.extend(report.averages.iter().map(average_cells));
    rows.push(total_cells(&report.totals, report.averages.len()));

    let mut widths = [0usize; 6];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(output, "{} Averages", report.period.label())?;
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                if i == 0 {
                    format!("{cell:<width$}")
                } else {
                    format!("{cell:>width$}")
                }
            })
            .collect();
        writeln!(output, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}

// ── menu ───────────────────────────────────────────────────────────────────────

const MENU: &str = "\nHealth & Fitness Tracker\n\
                    1. Add Daily Health Data\n\
                    2. View All Records\n\
                    3. Plot Goals Chart (Day/Week/Month)\n\
                    4. Exit";

/// Run the interactive menu until option 4 or end of input.
///
/// `show_report` displays a non-empty report; the binary opens the chart
/// TUI with it. Failed actions are reported and the menu is shown again.
pub fn run_menu<R, W, F>(
    store: &RecordStore,
    input: &mut R,
    output: &mut W,
    mut show_report: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Report) -> Result<()>,
{
    loop {
        writeln!(output, "{MENU}")?;
        let Some(choice) = prompt::ask(input, output, "Enter your choice: ")? else {
            writeln!(output)?;
            return Ok(());
        };

        let outcome = match choice.trim() {
            "1" => add_entry(store, AddArgs::default(), input, output),
            "2" => list_records(store, output),
            "3" => plot_goals(store, input, output, &mut show_report),
            "4" => return Ok(()),
            _ => {
                writeln!(output, "Invalid choice.")?;
                Ok(())
            }
        };

        if let Err(e) = outcome {
            warn!("Menu action failed: {:#}", e);
            writeln!(output, "Error: {:#}", e)?;
        }
    }
}

fn plot_goals<R, W, F>(store: &RecordStore, input: &mut R, output: &mut W, show_report: &mut F) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Report) -> Result<()>,
{
    writeln!(output, "Choose timeframe: day / week / month")?;
    let answer = prompt::ask(input, output, "Enter choice: ")?.unwrap_or_default();
    let Some(period) = Period::from_choice(&answer) else {
        writeln!(output, "Invalid choice.")?;
        return Ok(());
    };

    let report = Report::build(&store.load()?, period);
    if report.is_empty() {
        writeln!(output, "No records found.")?;
        return Ok(());
    }
    show_report(&report)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
