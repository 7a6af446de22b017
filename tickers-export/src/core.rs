use std::path::PathBuf;

use chrono::NaiveDate;
use tickers_config::shared::{DestinationConfig, ExportConfig, SourceConfig};
use tickers_etl::destination::{CsvDestination, Destination, MemoryDestination};
use tickers_etl::error::{ErrorKind, EtlResult};
use tickers_etl::etl_error;
use tickers_etl::pipeline::Pipeline;
use tickers_etl::source::{ParquetSource, ProtobufSource};
use tickers_etl::types::ExportSummary;
use tracing::{debug, info};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Row counts of the run.
    pub summary: ExportSummary,
    /// File written by the destination, [`None`] when the destination keeps rows in memory.
    pub output_path: Option<PathBuf>,
}

/// Runs one export for `run_date` with the provided configuration.
///
/// Validates the configuration, reads the Parquet source and then the protobuf source, and
/// writes the merged, ticker-ordered records to the configured destination.
pub async fn start_export(config: &ExportConfig, run_date: NaiveDate) -> EtlResult<ExportReport> {
    info!(%run_date, "starting reference tickers export");

    config.validate().map_err(|err| {
        etl_error!(
            ErrorKind::ConfigError,
            "Export configuration is invalid",
            detail = err.to_string(),
            source: err
        )
    })?;

    log_config(config);

    let columnar = ParquetSource::new(config.source.parquet_path.clone());
    let binary = ProtobufSource::new(config.source.protobuf_path.clone());

    // Each destination gets its own pipeline type. This is more verbose due to static dispatch,
    // but keeps the pipeline free of trait objects.
    let report = match &config.destination {
        DestinationConfig::Csv {
            output_dir,
            file_prefix,
        } => {
            let destination = CsvDestination::new(output_dir.clone(), file_prefix.clone());
            let output_path = destination.output_path(run_date);

            let summary = run_pipeline(columnar, binary, destination, run_date).await?;

            ExportReport {
                summary,
                output_path: Some(output_path),
            }
        }
        DestinationConfig::Memory => {
            let destination = MemoryDestination::new();

            let summary = run_pipeline(columnar, binary, destination, run_date).await?;

            ExportReport {
                summary,
                output_path: None,
            }
        }
    };

    info!(
        written_rows = report.summary.written_rows,
        "reference tickers export completed"
    );

    Ok(report)
}

async fn run_pipeline<D>(
    columnar: ParquetSource,
    binary: ProtobufSource,
    destination: D,
    run_date: NaiveDate,
) -> EtlResult<ExportSummary>
where
    D: Destination,
{
    let pipeline = Pipeline::new(columnar, binary, destination);

    pipeline.run(run_date).await
}

fn log_config(config: &ExportConfig) {
    log_source_config(&config.source);
    log_destination_config(&config.destination);
}

fn log_source_config(config: &SourceConfig) {
    debug!(
        parquet_path = %config.parquet_path.display(),
        protobuf_path = %config.protobuf_path.display(),
        "using source config"
    );
}

fn log_destination_config(config: &DestinationConfig) {
    match config {
        DestinationConfig::Csv {
            output_dir,
            file_prefix,
        } => {
            debug!(
                output_dir = %output_dir.display(),
                file_prefix,
                "using csv destination config"
            );
        }
        DestinationConfig::Memory => {
            debug!("using memory destination config");
        }
    }
}

#[cfg(test)]
mod tests {
    use tickers_etl::destination::csv_file::DEFAULT_FILE_PREFIX;

    use super::*;

    #[test]
    fn default_prefixes_agree() {
        assert_eq!(DestinationConfig::DEFAULT_FILE_PREFIX, DEFAULT_FILE_PREFIX);
    }
}
