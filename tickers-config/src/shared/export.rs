use serde::{Deserialize, Serialize};

use crate::shared::{DestinationConfig, SourceConfig, ValidationError};

/// Complete configuration of one export run.
///
/// Every section has defaults, so an empty configuration file reads the default input files
/// from the working directory and writes the CSV file next to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExportConfig {
    /// Input files.
    #[serde(default)]
    pub source: SourceConfig,
    /// Where the merged records are written.
    #[serde(default)]
    pub destination: DestinationConfig,
}

impl ExportConfig {
    /// Validates every section of the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.source.validate()?;
        self.destination.validate()
    }
}
