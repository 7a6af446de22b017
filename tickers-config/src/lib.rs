//! Configuration for the reference tickers exporter.
//!
//! Provides the [`shared::ExportConfig`] tree, its validation, and hierarchical loading from
//! configuration files and `TICKERS_`-prefixed environment variables.

mod environment;
mod load;
pub mod shared;

pub use environment::{ENVIRONMENT_ENV_NAME, Environment, UnknownEnvironment};
pub use load::{LoadConfigError, load_config_for_environment};
