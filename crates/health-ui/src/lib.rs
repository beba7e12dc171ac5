//! Terminal UI layer for the health tracker.
//!
//! Provides themes, the goals chart, averages and record tables, and the
//! application event loops built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod table_view;
pub mod themes;

pub use health_core as core;
