//! Table views for the health tracker TUI.
//!
//! Renders bordered [`ratatui::widgets::Table`]s: per-period averages with a
//! highlighted TOTAL row, and the raw list of stored records.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use health_core::formatting;
use health_core::models::HealthEntry;
use health_data::aggregator::{EntryTotals, PeriodAverages};

use crate::themes::Theme;

/// Column headers of the averages table.
pub const AVERAGE_HEADERS: [&str; 6] = [
    "Period",
    "Entries",
    "Avg Steps",
    "Avg Sleep",
    "Avg Calories",
    "Avg Water",
];

/// Column headers of the record table.
pub const RECORD_HEADERS: [&str; 5] = ["Date", "Steps", "Sleep", "Calories", "Water"];

/// Display cells for one averages row.
pub fn average_cells(row: &PeriodAverages) -> [String; 6] {
    [
        row.label.clone(),
        row.count.to_string(),
        formatting::format_count(row.steps_avg),
        formatting::format_measure(row.sleep_avg, "h"),
        formatting::format_number(row.calories_avg, 1),
        formatting::format_measure(row.water_avg, "L"),
    ]
}

/// Display cells for the TOTAL row: overall averages across all entries.
pub fn total_cells(totals: &EntryTotals, periods: usize) -> [String; 6] {
    [
        "TOTAL".to_string(),
        format!("{} in {} periods", totals.count, periods),
        formatting::format_count(totals.steps_avg()),
        formatting::format_measure(totals.sleep_avg(), "h"),
        formatting::format_number(totals.calories_avg(), 1),
        formatting::format_measure(totals.water_avg(), "L"),
    ]
}

/// Display cells for one stored record.
pub fn record_cells(entry: &HealthEntry) -> [String; 5] {
    [
        entry.date.to_string(),
        formatting::format_count(entry.steps),
        formatting::format_measure(entry.sleep_hours, "h"),
        formatting::format_count(entry.calories),
        formatting::format_measure(entry.water_liters, "L"),
    ]
}

fn striped<'a, const N: usize>(
    cells: impl Iterator<Item = [String; N]>,
    theme: &Theme,
) -> Vec<Row<'a>> {
    cells
        .enumerate()
        .map(|(i, cells)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(cells.map(Cell::from)).style(style)
        })
        .collect()
}

fn header_row<'a>(headers: &[&'a str], theme: &Theme) -> Row<'a> {
    Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1)
}

/// Render the per-period averages table into `area`.
pub fn render_averages_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[PeriodAverages],
    totals: &EntryTotals,
    theme: &Theme,
) {
    let mut all_rows = striped(rows.iter().map(average_cells), theme);
    all_rows.push(Row::new(total_cells(totals, rows.len()).map(Cell::from)).style(theme.table_total));

    let widths = [
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(12),
    ];

    let table = Table::new(all_rows, widths)
        .header(header_row(&AVERAGE_HEADERS, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render every stored record, in file order, into `area`.
pub fn render_records_table(
    frame: &mut Frame,
    area: Rect,
    entries: &[HealthEntry],
    theme: &Theme,
) {
    let rows = striped(entries.iter().map(record_cells), theme);

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header_row(&RECORD_HEADERS, theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Health Records ({}) ", entries.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_rows() -> Vec<PeriodAverages> {
        vec![
            PeriodAverages {
                label: "2024-01".to_string(),
                steps_avg: 9_250,
                sleep_avg: 7.25,
                calories_avg: 2_050.5,
                water_avg: 2.0,
                count: 2,
            },
            PeriodAverages {
                label: "2024-02".to_string(),
                steps_avg: 11_000,
                sleep_avg: 6.0,
                calories_avg: 1_900.0,
                water_avg: 1.75,
                count: 1,
            },
        ]
    }

    fn make_totals() -> EntryTotals {
        EntryTotals {
            steps: 29_500,
            sleep_hours: 20.5,
            calories: 6_001,
            water_liters: 5.75,
            count: 3,
        }
    }

    fn make_entry() -> HealthEntry {
        HealthEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            steps: 12_000,
            sleep_hours: 7.5,
            calories: 2_300,
            water_liters: 2.25,
        }
    }

    // ── Cell formatting ───────────────────────────────────────────────────────

    #[test]
    fn test_average_cells() {
        let cells = average_cells(&make_rows()[0]);
        assert_eq!(
            cells,
            [
                "2024-01".to_string(),
                "2".to_string(),
                "9,250".to_string(),
                "7.25 h".to_string(),
                "2,050.5".to_string(),
                "2.00 L".to_string(),
            ]
        );
    }

    #[test]
    fn test_total_cells_use_overall_averages() {
        let cells = total_cells(&make_totals(), 2);
        assert_eq!(cells[0], "TOTAL");
        assert_eq!(cells[1], "3 in 2 periods");
        assert_eq!(cells[2], "9,833");
    }

    #[test]
    fn test_record_cells() {
        let cells = record_cells(&make_entry());
        assert_eq!(cells[0], "2024-01-05");
        assert_eq!(cells[1], "12,000");
        assert_eq!(cells[2], "7.50 h");
        assert_eq!(cells[3], "2,300");
        assert_eq!(cells[4], "2.25 L");
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_averages_table_does_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let rows = make_rows();
        let totals = make_totals();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_averages_table(frame, area, "Monthly Averages", &rows, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_averages_table_empty_rows_does_not_panic() {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_averages_table(
                    frame,
                    area,
                    "Daily Averages",
                    &[],
                    &EntryTotals::default(),
                    &theme,
                );
            })
            .unwrap();
    }

    #[test]
    fn test_render_records_table_does_not_panic() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let entries = vec![make_entry(), make_entry()];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_records_table(frame, area, &entries, &theme);
            })
            .unwrap();
    }
}
