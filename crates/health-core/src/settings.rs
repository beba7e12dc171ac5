use clap::{Args, CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HealthError, Result};
use crate::models::Period;

/// Directory (under the home directory) holding the default data file and
/// the persisted last-used parameters.
pub const APP_DIR_NAME: &str = ".health-tracker";

/// File name of the default CSV data file inside [`APP_DIR_NAME`].
pub const DEFAULT_DATA_FILE: &str = "health_data.csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Log daily health metrics and chart your averages
#[derive(Parser, Debug, Clone)]
#[command(
    name = "health-tracker",
    about = "Log daily health metrics and chart your averages",
    version
)]
pub struct Settings {
    /// CSV file holding the health records
    #[arg(long, env = "HEALTH_TRACKER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,

    /// Grouping used by reports when none is given explicitly.
    #[arg(skip)]
    pub period: Period,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Actions available from the command line. Without a subcommand the
/// interactive menu is started.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log one day of health data; missing fields are prompted for
    Add(AddArgs),
    /// Show all stored records
    List {
        /// Show the records in a full-screen table
        #[arg(long)]
        tui: bool,
    },
    /// Chart average steps, sleep and water per day, week or month
    Report {
        /// Grouping period (defaults to the last one used)
        #[arg(long = "by", value_enum)]
        period: Option<Period>,
        /// Print a plain text table instead of the chart
        #[arg(long)]
        plain: bool,
    },
    /// Interactive menu
    Menu,
}

/// Field values for `add`. Kept as text so that coercion errors are reported
/// the same way as for interactive input.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct AddArgs {
    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// Steps walked
    #[arg(long)]
    pub steps: Option<String>,
    /// Sleep in hours
    #[arg(long)]
    pub sleep: Option<String>,
    /// Calories consumed
    #[arg(long)]
    pub calories: Option<String>,
    /// Water intake in liters
    #[arg(long)]
    pub water: Option<String>,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.health-tracker/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.health-tracker/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(APP_DIR_NAME).join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        let explicit_period = match settings.command {
            Some(Command::Report { period, .. }) => period,
            _ => None,
        };

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear settings at {}: {}", config_path.display(), e);
            }
            if let Some(period) = explicit_period {
                settings.period = period;
            }
            return Self::apply_overrides(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI (or env) always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if settings.data_file.is_none() {
            settings.data_file = last.data_file;
        }
        settings.period = explicit_period.or(last.period).unwrap_or_default();

        settings = Self::apply_overrides(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Could not persist settings to {}: {}", config_path.display(), e);
        }

        settings
    }

    /// Apply flags that override other settings (`--debug`).
    fn apply_overrides(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Resolve the CSV location: `--data-file` / env / last used, falling
    /// back to `~/.health-tracker/health_data.csv`.
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => default_data_path(),
        }
    }
}

/// `~/.health-tracker/health_data.csv`.
pub fn default_data_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        HealthError::Config("cannot locate a home directory; pass --data-file".to_string())
    })?;
    Ok(home.join(APP_DIR_NAME).join(DEFAULT_DATA_FILE))
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            data_file: s.data_file.clone(),
            period: Some(s.period),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    fn args(list: &[&str]) -> Vec<std::ffi::OsString> {
        list.iter().map(|s| (*s).into()).collect()
    }

    // ── LastUsedParams ───────────────────────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            data_file: Some(PathBuf::from("/tmp/health.csv")),
            period: Some(Period::Week),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded, params);
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        };
        params.save_to(&path).expect("save");
        assert!(path.exists(), "file must exist after save");

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists(), "file must be gone after clear");
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert_eq!(loaded, LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_default_when_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());
    }

    // ── CLI parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["health-tracker"]);

        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
        assert!(settings.command.is_none());
        assert_eq!(settings.period, Period::Day);
    }

    #[test]
    fn test_settings_add_subcommand() {
        let settings = Settings::parse_from([
            "health-tracker",
            "add",
            "--date",
            "2024-01-05",
            "--steps",
            "8000",
        ]);
        let Some(Command::Add(add)) = settings.command else {
            panic!("expected add subcommand");
        };
        assert_eq!(add.date.as_deref(), Some("2024-01-05"));
        assert_eq!(add.steps.as_deref(), Some("8000"));
        assert!(add.sleep.is_none());
    }

    #[test]
    fn test_settings_report_subcommand() {
        let settings = Settings::parse_from(["health-tracker", "report", "--by", "month", "--plain"]);
        assert_eq!(
            settings.command,
            Some(Command::Report {
                period: Some(Period::Month),
                plain: true
            })
        );
    }

    #[test]
    fn test_settings_rejects_unknown_period() {
        let result = Settings::try_parse_from(["health-tracker", "report", "--by", "year"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_data_file_flag() {
        let settings =
            Settings::parse_from(["health-tracker", "--data-file", "/tmp/h.csv", "list"]);
        assert_eq!(settings.data_file, Some(PathBuf::from("/tmp/h.csv")));
        assert_eq!(settings.command, Some(Command::List { tui: false }));
    }

    // ── load_with_last_used ──────────────────────────────────────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_values() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("dark".to_string()),
            data_file: Some(PathBuf::from("/data/health.csv")),
            period: Some(Period::Month),
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(args(&["health-tracker", "list"]), &config_path);
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.data_file, Some(PathBuf::from("/data/health.csv")));
        assert_eq!(settings.period, Period::Month);
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("dark".to_string()),
            period: Some(Period::Month),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            args(&["health-tracker", "--theme", "light", "report", "--by", "week"]),
            &config_path,
        );
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.period, Period::Week);

        let persisted = LastUsedParams::load_from(&config_path);
        assert_eq!(persisted.period, Some(Period::Week));
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("classic".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            args(&["health-tracker", "--clear"]),
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
        assert_eq!(settings.theme, "auto");
    }

    #[test]
    fn test_clear_at_reports_failure() {
        let tmp = TempDir::new().expect("tempdir");
        // A directory in place of the config file cannot be removed as a file.
        let path = tmp_config_path(&tmp);
        std::fs::create_dir_all(&path).unwrap();

        assert!(LastUsedParams::clear_at(&path).is_err());
    }

    #[test]
    fn test_load_with_last_used_clear_failure_still_loads() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        std::fs::create_dir_all(&config_path).unwrap();

        let settings = Settings::load_with_last_used_impl(
            args(&["health-tracker", "--clear", "report", "--by", "month"]),
            &config_path,
        );

        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.period, Period::Month);
        assert!(config_path.is_dir());
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            args(&["health-tracker", "--debug"]),
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_data_path_prefers_explicit_file() {
        let settings = Settings::parse_from(["health-tracker", "--data-file", "mine.csv"]);
        assert_eq!(settings.data_path().unwrap(), PathBuf::from("mine.csv"));
    }

    #[test]
    fn test_default_data_path_file_name() {
        if let Ok(path) = default_data_path() {
            assert!(path.ends_with(Path::new(APP_DIR_NAME).join(DEFAULT_DATA_FILE)));
        }
    }
}
