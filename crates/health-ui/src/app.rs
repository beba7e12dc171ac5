//! Application state and TUI event loops for the health tracker.
//!
//! [`App`] owns the theme and drives two full-screen views: the period
//! report (goals chart or averages table, toggled with Tab) and the list of
//! stored records.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use health_core::models::{HealthEntry, Period};
use health_data::aggregator::{EntryTotals, PeriodAverages};

use crate::chart_view;
use crate::table_view;
use crate::themes::Theme;

const TICK_RATE: Duration = Duration::from_millis(250);

// ── ReportView ────────────────────────────────────────────────────────────────

/// Which rendering of a period report is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportView {
    #[default]
    Chart,
    Table,
}

impl ReportView {
    pub fn toggle(self) -> Self {
        match self {
            ReportView::Chart => ReportView::Table,
            ReportView::Table => ReportView::Chart,
        }
    }
}

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleView,
    Ignore,
}

/// Map a key press to an action. Quits on `q`, `Q`, `Esc` or `Ctrl+C`.
pub fn handle_key(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab | KeyCode::Char('t') => KeyAction::ToggleView,
        _ => KeyAction::Ignore,
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
}

impl App {
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
        }
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Show the report for `period` until the user quits.
    ///
    /// Starts on the goals chart; Tab switches to the averages table and back.
    pub fn run_report(
        &self,
        period: Period,
        averages: &[PeriodAverages],
        totals: &EntryTotals,
    ) -> io::Result<()> {
        run_in_terminal(ReportView::Chart, |frame, view| {
            self.render_report(frame, view, period, averages, totals)
        })
    }

    /// Show every stored record until the user quits.
    pub fn run_records(&self, entries: &[HealthEntry]) -> io::Result<()> {
        run_in_terminal(ReportView::Table, |frame, _| {
            self.render_records(frame, entries)
        })
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render_report(
        &self,
        frame: &mut Frame,
        view: ReportView,
        period: Period,
        averages: &[PeriodAverages],
        totals: &EntryTotals,
    ) {
        let (body, footer) = split_footer(frame.area());

        if averages.is_empty() {
            chart_view::render_no_data(frame, body, &self.theme);
        } else {
            match view {
                ReportView::Chart => {
                    chart_view::render_goals_chart(frame, body, period, averages, &self.theme)
                }
                ReportView::Table => {
                    let title = format!("{} Averages", period.label());
                    table_view::render_averages_table(
                        frame,
                        body,
                        &title,
                        averages,
                        totals,
                        &self.theme,
                    )
                }
            }
        }

        self.render_footer(frame, footer, "q/Esc quit   Tab chart/table");
    }

    pub fn render_records(&self, frame: &mut Frame, entries: &[HealthEntry]) {
        let (body, footer) = split_footer(frame.area());

        if entries.is_empty() {
            chart_view::render_no_data(frame, body, &self.theme);
        } else {
            table_view::render_records_table(frame, body, entries, &self.theme);
        }

        self.render_footer(frame, footer, "q/Esc quit");
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, hint: &str) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(hint.to_string(), self.theme.dim))),
            area,
        );
    }
}

fn split_footer(area: Rect) -> (Rect, Rect) {
    let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    (body, footer)
}

// ── Terminal lifecycle ────────────────────────────────────────────────────────

/// Enter the alternate screen, run the draw/poll loop, and always restore
/// the terminal before returning.
fn run_in_terminal<F>(initial: ReportView, draw: F) -> io::Result<()>
where
    F: FnMut(&mut Frame, ReportView),
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    restore_on_err(execute!(stdout, EnterAlternateScreen), &mut stdout)?;
    let mut terminal = restore_on_err(
        Terminal::new(CrosstermBackend::new(io::stdout())),
        &mut stdout,
    )?;

    let result = event_loop(&mut terminal, initial, draw);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// Pass `result` through, leaving raw mode and the alternate screen first
/// when it is an error.
fn restore_on_err<T, W: io::Write>(result: io::Result<T>, out: &mut W) -> io::Result<T> {
    if result.is_err() {
        let _ = disable_raw_mode();
        let _ = execute!(out, LeaveAlternateScreen);
    }
    result
}

fn event_loop<F>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    initial: ReportView,
    mut draw: F,
) -> io::Result<()>
where
    F: FnMut(&mut Frame, ReportView),
{
    let mut view = initial;
    loop {
        terminal.draw(|frame| draw(frame, view))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                match handle_key(key) {
                    KeyAction::Quit => return Ok(()),
                    KeyAction::ToggleView => view = view.toggle(),
                    KeyAction::Ignore => {}
                }
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
