//! Entry points of the reference tickers exporter.
//!
//! [`start_export`] builds the sources and the configured destination from an
//! [`tickers_config::shared::ExportConfig`] and runs one export for a given date. The
//! `tickers-export` binary wraps it with configuration loading, tracing and a CLI.

pub mod config;
mod core;

pub use core::{ExportReport, start_export};
