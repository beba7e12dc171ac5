mod bootstrap;
mod commands;
mod prompt;

use std::io;

use anyhow::Result;
use health_core::settings::{Command, Settings};
use health_data::store::RecordStore;
use health_ui::app::App;

use crate::commands::Report;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Health Tracker v{} starting", env!("CARGO_PKG_VERSION"));

    run(&settings).inspect_err(|e| tracing::error!("{:#}", e))
}

fn run(settings: &Settings) -> Result<()> {
    let store = RecordStore::new(settings.data_path()?);
    tracing::info!("Data file: {}", store.path().display());

    let app = App::new(&settings.theme);
    let show_report = |report: &Report| -> Result<()> {
        app.run_report(report.period, &report.averages, &report.totals)?;
        Ok(())
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match settings.command.clone().unwrap_or(Command::Menu) {
        Command::Add(args) => {
            tracing::info!("Running add");
            commands::add_entry(&store, args, &mut input, &mut output)
        }
        Command::List { tui } => {
            tracing::info!("Running list (tui: {})", tui);
            if tui {
                app.run_records(&store.load()?)?;
                Ok(())
            } else {
                commands::list_records(&store, &mut output)
            }
        }
        Command::Report { plain, .. } => {
            tracing::info!("Running {} report", settings.period);
            let report = Report::build(&store.load()?, settings.period);
            if plain || report.is_empty() {
                commands::print_report(&report, &mut output)
            } else {
                show_report(&report)
            }
        }
        Command::Menu => {
            tracing::info!("Starting interactive menu");
            commands::run_menu(&store, &mut input, &mut output, show_report)
        }
    }
}
