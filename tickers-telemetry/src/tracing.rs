use std::sync::Once;

use thiserror::Error;
use tickers_config::Environment;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Filter directive applied when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber was already installed.
    #[error("failed to install the tracing subscriber for `{app_name}`: {source}")]
    Init {
        app_name: String,
        #[source]
        source: TryInitError,
    },
}

/// Installs the global tracing subscriber for `app_name`.
///
/// The filter is read from `RUST_LOG`, falling back to `info`. Development builds log in a
/// human-readable multi-line format, production logs one JSON object per line so that log
/// shippers can parse them.
pub fn init_tracing(app_name: &str, environment: Environment) -> Result<(), TracingError> {
    let filter = env_filter();
    let registry = tracing_subscriber::registry().with(filter);

    let result = match environment {
        Environment::Dev => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_target(true))
            .try_init(),
        Environment::Prod => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
    };

    result.map_err(|source| TracingError::Init {
        app_name: app_name.to_string(),
        source,
    })?;

    tracing::debug!(app_name, %environment, "tracing initialized");

    Ok(())
}

/// Installs a subscriber that writes through the test harness, once per process.
///
/// Safe to call from every test; only the first call installs the subscriber and later calls
/// are no-ops. A subscriber installed by something else is left in place.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
