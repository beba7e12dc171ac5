//! Data layer for the health tracker.
//!
//! Responsible for persisting entries in the CSV record store and grouping
//! them into per-period averages for reports.

pub mod aggregator;
pub mod store;

pub use health_core as core;
