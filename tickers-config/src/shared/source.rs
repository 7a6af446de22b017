use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourceConfig {
    /// Path of the Parquet file holding company records.
    #[serde(default = "default_parquet_path")]
    pub parquet_path: PathBuf,
    /// Path of the protobuf file holding a serialized daily ticker file.
    #[serde(default = "default_protobuf_path")]
    pub protobuf_path: PathBuf,
}

impl SourceConfig {
    /// Default Parquet input file, relative to the working directory.
    pub const DEFAULT_PARQUET_PATH: &'static str = "hampton-deville.parquet";

    /// Default protobuf input file, relative to the working directory.
    pub const DEFAULT_PROTOBUF_PATH: &'static str = "reference-tickers.hooli";

    /// Validates that both input paths are set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.parquet_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("source.parquet_path"));
        }

        if self.protobuf_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("source.protobuf_path"));
        }

        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            parquet_path: default_parquet_path(),
            protobuf_path: default_protobuf_path(),
        }
    }
}

fn default_parquet_path() -> PathBuf {
    PathBuf::from(SourceConfig::DEFAULT_PARQUET_PATH)
}

fn default_protobuf_path() -> PathBuf {
    PathBuf::from(SourceConfig::DEFAULT_PROTOBUF_PATH)
}
