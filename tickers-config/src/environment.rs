use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Name of the environment variable selecting the runtime environment.
pub const ENVIRONMENT_ENV_NAME: &str = "TICKERS_ENVIRONMENT";

const DEV_ENV_NAME: &str = "dev";

const PROD_ENV_NAME: &str = "prod";

/// Error returned when an environment name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("`{0}` is not a supported environment, use either `dev` or `prod`")]
pub struct UnknownEnvironment(pub String);

/// Runtime environment of the exporter.
///
/// Selects the environment-specific configuration file and the log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development: pretty logs, `dev.*` configuration overrides.
    #[default]
    Dev,
    /// Production: JSON logs, `prod.*` configuration overrides.
    Prod,
}

impl Environment {
    /// Loads the environment from [`ENVIRONMENT_ENV_NAME`], defaulting to [`Environment::Dev`]
    /// when the variable is unset.
    pub fn load() -> Result<Environment, UnknownEnvironment> {
        match std::env::var(ENVIRONMENT_ENV_NAME) {
            Ok(name) => name.parse(),
            Err(_) => Ok(Environment::Dev),
        }
    }

    /// Returns the lowercase name of the environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => DEV_ENV_NAME,
            Environment::Prod => PROD_ENV_NAME,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    /// Parses an environment name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            DEV_ENV_NAME => Ok(Environment::Dev),
            PROD_ENV_NAME => Ok(Environment::Prod),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("dev".parse(), Ok(Environment::Dev));
        assert_eq!("PROD".parse(), Ok(Environment::Prod));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "staging".parse::<Environment>(),
            Err(UnknownEnvironment("staging".to_string()))
        );
    }

    #[test]
    fn displays_lowercase_name() {
        assert_eq!(Environment::Prod.to_string(), "prod");
    }
}
