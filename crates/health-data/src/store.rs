//! Flat-file persistence for health entries.
//!
//! The whole dataset lives in one CSV file with the header
//! `Date,Steps,Sleep,Calories,Water`. Every write rewrites the full file;
//! there is no incremental append and no locking, so two processes writing
//! at once can lose an entry.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use health_core::error::{HealthError, Result};
use health_core::models::HealthEntry;
use serde::Deserialize;
use tracing::{debug, warn};

/// Storage header, in storage column order.
pub const HEADER: [&str; 5] = ["Date", "Steps", "Sleep", "Calories", "Water"];

/// One CSV row as text. Column presence is checked by the CSV layer, value
/// coercion by [`HealthEntry::from_fields`].
#[derive(Debug, Deserialize)]
struct StoredRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Steps")]
    steps: String,
    #[serde(rename = "Sleep")]
    sleep: String,
    #[serde(rename = "Calories")]
    calories: String,
    #[serde(rename = "Water")]
    water: String,
}

impl StoredRow {
    fn into_entry(self) -> Result<HealthEntry> {
        HealthEntry::from_fields(
            &self.date,
            &self.steps,
            &self.sleep,
            &self.calories,
            &self.water,
        )
    }
}

/// The CSV file holding every [`HealthEntry`].
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored entry in file order.
    ///
    /// A missing file is an empty store. Rows with missing columns fail with
    /// [`HealthError::Storage`]; values that do not coerce to their type fail
    /// with [`HealthError::Parse`].
    pub fn load(&self) -> Result<Vec<HealthEntry>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(HealthError::storage(&self.path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let mut entries = Vec::new();
        for (index, row) in reader.deserialize::<StoredRow>().enumerate() {
            let row = row.map_err(|e| HealthError::storage(&self.path, e))?;
            let entry = row.into_entry().inspect_err(|e| {
                // Line 1 is the header.
                warn!("{} line {}: {}", self.path.display(), index + 2, e);
            })?;
            entries.push(entry);
        }

        debug!("Loaded {} entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    /// Replace the stored dataset with `entries`.
    ///
    /// Rows are written to a sibling temp file that is then renamed over the
    /// data file, so a failed write leaves the previous contents in place.
    pub fn save(&self, entries: &[HealthEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HealthError::storage(&self.path, e))?;
        }

        let tmp = self.temp_path();
        if let Err(e) = self.write_rows(&tmp, entries) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(HealthError::storage(&self.path, e));
        }

        debug!("Saved {} entries to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Add `entry` after the existing ones by rewriting the whole file.
    ///
    /// Returns the number of stored entries afterwards.
    pub fn append(&self, entry: HealthEntry) -> Result<usize> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)?;
        Ok(entries.len())
    }

    fn write_rows(&self, target: &Path, entries: &[HealthEntry]) -> Result<()> {
        let to_storage = |e: csv::Error| HealthError::storage(&self.path, e);

        // Header is written by hand so an empty dataset still gets one.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(target)
            .map_err(to_storage)?;
        writer.write_record(HEADER).map_err(to_storage)?;
        for entry in entries {
            writer.serialize(entry).map_err(to_storage)?;
        }
        writer
            .flush()
            .map_err(|e| HealthError::storage(&self.path, e))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
