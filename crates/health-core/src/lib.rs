//! Domain layer for the health tracker.
//!
//! Holds the typed [`models::HealthEntry`] record, the reporting
//! [`models::Period`], the shared error type, CLI settings with persisted
//! last-used parameters, and number formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
