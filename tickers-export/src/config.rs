use std::path::{Path, PathBuf};

use anyhow::Context;
use tickers_config::shared::{DestinationConfig, ExportConfig};
use tickers_config::{Environment, load_config_for_environment};
use tracing::{info, warn};

/// Settings given on the command line that take precedence over the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ExportOverrides {
    pub parquet_path: Option<PathBuf>,
    pub protobuf_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl ExportOverrides {
    /// Applies every override that is set to `config`.
    ///
    /// An output directory only applies to the CSV destination and is ignored otherwise.
    pub fn apply(self, config: &mut ExportConfig) {
        if let Some(parquet_path) = self.parquet_path {
            config.source.parquet_path = parquet_path;
        }

        if let Some(protobuf_path) = self.protobuf_path {
            config.source.protobuf_path = protobuf_path;
        }

        if let Some(new_output_dir) = self.output_dir {
            match &mut config.destination {
                DestinationConfig::Csv { output_dir, .. } => *output_dir = new_output_dir,
                DestinationConfig::Memory => {
                    warn!(
                        output_dir = %new_output_dir.display(),
                        "output directory override ignored by the memory destination"
                    );
                }
            }
        }
    }
}

/// Loads and validates the export configuration.
///
/// Without a configuration directory the built-in defaults are used. Overrides are applied
/// after loading and before validation.
pub fn load_export_config(
    config_dir: Option<&Path>,
    environment: Environment,
    overrides: ExportOverrides,
) -> anyhow::Result<ExportConfig> {
    let mut config = match config_dir {
        Some(config_dir) => {
            info!(config_dir = %config_dir.display(), %environment, "loading configuration");
            load_config_for_environment::<ExportConfig>(config_dir, environment)?
        }
        None => ExportConfig::default(),
    };

    overrides.apply(&mut config);
    config
        .validate()
        .context("export configuration is invalid")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use tickers_config::shared::ValidationError;

    use super::*;

    #[test]
    fn defaults_are_used_without_a_directory() {
        let config =
            load_export_config(None, Environment::Dev, ExportOverrides::default()).unwrap();

        assert_eq!(config, ExportConfig::default());
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.yaml"),
            "source:\n  parquet_path: companies.parquet\ndestination:\n  csv:\n    output_dir: out\n",
        )
        .unwrap();

        let overrides = ExportOverrides {
            protobuf_path: Some(PathBuf::from("tickers.bin")),
            output_dir: Some(PathBuf::from("exports")),
            ..Default::default()
        };
        let config = load_export_config(Some(dir.path()), Environment::Dev, overrides).unwrap();

        assert_eq!(
            config.source.parquet_path,
            PathBuf::from("companies.parquet")
        );
        assert_eq!(config.source.protobuf_path, PathBuf::from("tickers.bin"));
        assert_eq!(
            config.destination,
            DestinationConfig::Csv {
                output_dir: PathBuf::from("exports"),
                file_prefix: DestinationConfig::DEFAULT_FILE_PREFIX.to_string(),
            }
        );
    }

    #[test]
    fn output_dir_override_leaves_memory_destination_alone() {
        let mut config = ExportConfig {
            destination: DestinationConfig::Memory,
            ..Default::default()
        };

        ExportOverrides {
            output_dir: Some(PathBuf::from("exports")),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.destination, DestinationConfig::Memory);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let overrides = ExportOverrides {
            parquet_path: Some(PathBuf::new()),
            ..Default::default()
        };

        let err = load_export_config(None, Environment::Dev, overrides).unwrap_err();

        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyPath("source.parquet_path"))
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("configuration");

        let result = load_export_config(
            Some(&missing),
            Environment::Dev,
            ExportOverrides::default(),
        );

        assert!(result.is_err());
    }
}
