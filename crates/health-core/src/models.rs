use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{HealthError, Result};

/// Calendar date format used for input, storage, and daily period keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's logged health metrics.
///
/// Serialises with the storage column names in the fixed storage order:
/// `Date,Steps,Sleep,Calories,Water`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthEntry {
    /// Calendar day the metrics belong to. Not unique across entries.
    #[serde(rename = "Date", serialize_with = "serialize_date")]
    pub date: NaiveDate,
    /// Steps walked.
    #[serde(rename = "Steps")]
    pub steps: u64,
    /// Hours slept.
    #[serde(rename = "Sleep")]
    pub sleep_hours: f64,
    /// Calories consumed.
    #[serde(rename = "Calories")]
    pub calories: u64,
    /// Water intake in litres.
    #[serde(rename = "Water")]
    pub water_liters: f64,
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}

impl HealthEntry {
    /// Build an entry from raw text fields, coercing each one to its type.
    ///
    /// The first field that fails to parse is reported; nothing else is
    /// validated.
    pub fn from_fields(
        date: &str,
        steps: &str,
        sleep_hours: &str,
        calories: &str,
        water_liters: &str,
    ) -> Result<Self> {
        Ok(Self {
            date: parse_date(date)?,
            steps: parse_count("steps", steps)?,
            sleep_hours: parse_measure("sleep", sleep_hours)?,
            calories: parse_count("calories", calories)?,
            water_liters: parse_measure("water", water_liters)?,
        })
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| HealthError::parse("date", value, format!("{e}, expected YYYY-MM-DD")))
}

/// Parse a non-negative integer count such as steps or calories.
pub fn parse_count(field: &'static str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| HealthError::parse(field, value, e))
}

/// Parse a floating-point measurement such as sleep hours or water litres.
pub fn parse_measure(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| HealthError::parse(field, value, e))
}

// ── Period ───────────────────────────────────────────────────────────────────

/// Calendar granularity used to group entries for reports.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    /// Period key for `date`.
    ///
    /// * `Day`   → `"2024-01-05"`
    /// * `Week`  → `"2024-W00"`, Sunday-start week of the year; days before
    ///   the first Sunday fall into week `00`.
    /// * `Month` → `"2024-01"`
    pub fn key_for(self, date: NaiveDate) -> String {
        match self {
            Period::Day => date.format(DATE_FORMAT).to_string(),
            Period::Week => date.format("%Y-W%U").to_string(),
            Period::Month => date.format("%Y-%m").to_string(),
        }
    }

    /// Adjective used in report titles, e.g. `"Weekly"`.
    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "Daily",
            Period::Week => "Weekly",
            Period::Month => "Monthly",
        }
    }

    /// Plural noun used for the x axis, e.g. `"Weeks"`.
    pub fn axis_label(self) -> &'static str {
        match self {
            Period::Day => "Days",
            Period::Week => "Weeks",
            Period::Month => "Months",
        }
    }

    /// Parse a user-typed timeframe (`day`, `week`, `month`), case-insensitive.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "day" => Some(Period::Day),
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            _ => None,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Day => write!(f, "day"),
            Period::Week => write!(f, "week"),
            Period::Month => write!(f, "month"),
        }
    }
}
