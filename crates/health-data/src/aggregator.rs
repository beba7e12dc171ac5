//! Per-period averages over daily, weekly, and monthly windows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use health_core::models::{HealthEntry, Period};

// ── EntryTotals ───────────────────────────────────────────────────────────────

/// Running sums of the four metrics plus the number of contributing entries.
///
/// Integer sums are `u128` so that any number of `u64` counts adds up
/// without overflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryTotals {
    pub steps: u128,
    pub sleep_hours: f64,
    pub calories: u128,
    pub water_liters: f64,
    pub count: u32,
}

impl EntryTotals {
    /// Add a single entry's values to the running totals.
    pub fn add_entry(&mut self, entry: &HealthEntry) {
        self.steps += u128::from(entry.steps);
        self.sleep_hours += entry.sleep_hours;
        self.calories += u128::from(entry.calories);
        self.water_liters += entry.water_liters;
        self.count += 1;
    }

    /// Average steps, rounded down. `0` when there are no entries.
    pub fn steps_avg(&self) -> u64 {
        let avg = self.steps.checked_div(u128::from(self.count)).unwrap_or(0);
        // A mean never exceeds the largest input, which fits in u64.
        u64::try_from(avg).unwrap_or(u64::MAX)
    }

    pub fn sleep_avg(&self) -> f64 {
        self.mean(self.sleep_hours)
    }

    pub fn calories_avg(&self) -> f64 {
        self.mean(self.calories as f64)
    }

    pub fn water_avg(&self) -> f64 {
        self.mean(self.water_liters)
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / f64::from(self.count)
        }
    }
}

// ── AggregatedPeriod ──────────────────────────────────────────────────────────

/// All entries within one period (a day, a week, or a month).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPeriod {
    /// The period key, e.g. `"2024-01-15"`, `"2024-W02"` or `"2024-01"`.
    pub period_key: String,
    /// Combined sums for the period.
    pub totals: EntryTotals,
}

impl AggregatedPeriod {
    fn new(period_key: impl Into<String>) -> Self {
        Self {
            period_key: period_key.into(),
            totals: EntryTotals::default(),
        }
    }

    fn add_entry(&mut self, entry: &HealthEntry) {
        self.totals.add_entry(entry);
    }

    /// The averages handed to the reporting front-end.
    pub fn averages(&self) -> PeriodAverages {
        PeriodAverages {
            label: self.period_key.clone(),
            steps_avg: self.totals.steps_avg(),
            sleep_avg: self.totals.sleep_avg(),
            calories_avg: self.totals.calories_avg(),
            water_avg: self.totals.water_avg(),
            count: self.totals.count,
        }
    }
}

/// One point of a report series.
///
/// Steps use integer floor division; the other averages use real division.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAverages {
    pub label: String,
    pub steps_avg: u64,
    pub sleep_avg: f64,
    pub calories_avg: f64,
    pub water_avg: f64,
    /// Entries contributing to this period.
    pub count: u32,
}

// ── PeriodAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups health entries by calendar period.
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Group `entries` by `period`.
    ///
    /// Returns one [`AggregatedPeriod`] per key that has at least one entry,
    /// sorted by key (ascending). Input order does not matter.
    pub fn aggregate(entries: &[HealthEntry], period: Period) -> Vec<AggregatedPeriod> {
        Self::aggregate_by_period(entries, |date| period.key_for(date))
    }

    /// Aggregate by calendar day. Key format: `"%Y-%m-%d"`.
    pub fn aggregate_daily(entries: &[HealthEntry]) -> Vec<AggregatedPeriod> {
        Self::aggregate(entries, Period::Day)
    }

    /// Aggregate by Sunday-start week. Key format: `"%Y-W%U"`.
    pub fn aggregate_weekly(entries: &[HealthEntry]) -> Vec<AggregatedPeriod> {
        Self::aggregate(entries, Period::Week)
    }

    /// Aggregate by calendar month. Key format: `"%Y-%m"`.
    pub fn aggregate_monthly(entries: &[HealthEntry]) -> Vec<AggregatedPeriod> {
        Self::aggregate(entries, Period::Month)
    }

    /// Aggregate and reduce straight to the report series.
    pub fn averages(entries: &[HealthEntry], period: Period) -> Vec<PeriodAverages> {
        Self::aggregate(entries, period)
            .iter()
            .map(AggregatedPeriod::averages)
            .collect()
    }

    /// Sum up all periods into a single [`EntryTotals`].
    pub fn calculate_totals(data: &[AggregatedPeriod]) -> EntryTotals {
        let mut totals = EntryTotals::default();
        for period in data {
            totals.steps += period.totals.steps;
            totals.sleep_hours += period.totals.sleep_hours;
            totals.calories += period.totals.calories;
            totals.water_liters += period.totals.water_liters;
            totals.count += period.totals.count;
        }
        totals
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// `key_fn` maps an entry date to the string period key.
    fn aggregate_by_period(
        entries: &[HealthEntry],
        key_fn: impl Fn(NaiveDate) -> String,
    ) -> Vec<AggregatedPeriod> {
        // BTreeMap keeps keys sorted; all key formats sort chronologically.
        let mut map: BTreeMap<String, AggregatedPeriod> = BTreeMap::new();

        for entry in entries {
            let key = key_fn(entry.date);
            map.entry(key.clone())
                .or_insert_with(|| AggregatedPeriod::new(key))
                .add_entry(entry);
        }

        map.into_values().collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
