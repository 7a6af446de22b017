use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Configuration for supported export destinations.
///
/// Serialized externally tagged, so a CSV destination is written as
/// `csv: { output_dir: ..., file_prefix: ... }` and the in-memory destination as the bare
/// string `memory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationConfig {
    /// Writes a date-stamped CSV file.
    Csv {
        /// Directory the CSV file is created in.
        #[serde(default = "default_output_dir")]
        output_dir: PathBuf,
        /// File name prefix, followed by `_<YYYY-MM-DD>.csv`.
        #[serde(default = "default_file_prefix")]
        file_prefix: String,
    },
    /// Keeps the records in memory and logs them, without touching the filesystem.
    Memory,
}

impl DestinationConfig {
    /// Default output directory of the CSV destination.
    pub const DEFAULT_OUTPUT_DIR: &'static str = ".";

    /// Default file name prefix of the CSV destination.
    pub const DEFAULT_FILE_PREFIX: &'static str = "reference-tickers";

    /// Validates the destination settings.
    ///
    /// The CSV file prefix must be non-empty and must not contain a path separator.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            DestinationConfig::Csv {
                output_dir,
                file_prefix,
            } => {
                if output_dir.as_os_str().is_empty() {
                    return Err(ValidationError::EmptyPath("destination.csv.output_dir"));
                }

                if file_prefix.is_empty() {
                    return Err(ValidationError::InvalidFieldValue {
                        field: "destination.csv.file_prefix",
                        constraint: "must not be empty",
                    });
                }

                if file_prefix.contains(['/', '\\']) {
                    return Err(ValidationError::InvalidFieldValue {
                        field: "destination.csv.file_prefix",
                        constraint: "must not contain a path separator",
                    });
                }

                Ok(())
            }
            DestinationConfig::Memory => Ok(()),
        }
    }
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self::Csv {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DestinationConfig::DEFAULT_OUTPUT_DIR)
}

fn default_file_prefix() -> String {
    DestinationConfig::DEFAULT_FILE_PREFIX.to_string()
}
