use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tickers_config::shared::{DestinationConfig, ExportConfig, SourceConfig};
use tickers_etl::error::ErrorKind;
use tickers_etl::test_utils::fixtures::{
    ParquetTickerRow, temp_dir, ticker, write_parquet_tickers, write_protobuf_tickers,
};
use tickers_etl::types::ExportSummary;
use tickers_export::start_export;
use tickers_telemetry::tracing::init_test_tracing;

const HEADER: &str = "Ticker,Name,SICCode,Description,TotalEmployees\n";

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn csv_config(dir: &Path) -> ExportConfig {
    ExportConfig {
        source: SourceConfig {
            parquet_path: dir.join("hampton-deville.parquet"),
            protobuf_path: dir.join("reference-tickers.hooli"),
        },
        destination: DestinationConfig::Csv {
            output_dir: dir.to_path_buf(),
            file_prefix: DestinationConfig::DEFAULT_FILE_PREFIX.to_string(),
        },
    }
}

fn expected_output(dir: &Path) -> PathBuf {
    dir.join("reference-tickers_2024-03-15.csv")
}

#[tokio::test]
async fn merges_both_sources_into_ordered_csv() {
    init_test_tracing();
    let dir = temp_dir();
    let config = csv_config(dir.path());

    let mut zeta = ParquetTickerRow::new("ZZZ", "Zeta Corp", "7372", "Software", 10);
    zeta.currency = "usd".to_string();
    zeta.phone = "555-0100".to_string();
    zeta.homepage = "https://zeta.example".to_string();
    zeta.round_lot = 100;
    write_parquet_tickers(&config.source.parquet_path, &[zeta]);
    write_protobuf_tickers(
        &config.source.protobuf_path,
        vec![ticker("AAA", "Alpha Inc", "1311", "Oil, gas", 5)],
    );

    let report = start_export(&config, run_date()).await.unwrap();

    assert_eq!(report.output_path, Some(expected_output(dir.path())));
    assert_eq!(
        report.summary,
        ExportSummary {
            columnar_rows: 1,
            binary_rows: 1,
            written_rows: 2,
        }
    );

    let content = std::fs::read_to_string(expected_output(dir.path())).unwrap();
    assert_eq!(
        content,
        format!("{HEADER}AAA,Alpha Inc,1311,\"Oil, gas\",5\nZZZ,Zeta Corp,7372,Software,10\n")
    );
    assert!(!content.contains("555-0100"));
    assert!(!content.contains("zeta.example"));
}

#[tokio::test]
async fn keeps_duplicates_across_sources_in_merge_order() {
    init_test_tracing();
    let dir = temp_dir();
    let config = csv_config(dir.path());

    write_parquet_tickers(
        &config.source.parquet_path,
        &[
            ParquetTickerRow::new("MSFT", "Microsoft (parquet)", "7372", "", 221000),
            ParquetTickerRow::new("AAPL", "Apple", "3571", "", 161000),
        ],
    );
    write_protobuf_tickers(
        &config.source.protobuf_path,
        vec![ticker("MSFT", "Microsoft (protobuf)", "7372", "", 0)],
    );

    start_export(&config, run_date()).await.unwrap();

    let content = std::fs::read_to_string(expected_output(dir.path())).unwrap();
    assert_eq!(
        content,
        format!(
            "{HEADER}AAPL,Apple,3571,,161000\n\
             MSFT,Microsoft (parquet),7372,,221000\n\
             MSFT,Microsoft (protobuf),7372,,0\n"
        )
    );
}

#[tokio::test]
async fn empty_sources_produce_header_only_file() {
    init_test_tracing();
    let dir = temp_dir();
    let config = csv_config(dir.path());

    write_parquet_tickers(&config.source.parquet_path, &[]);
    write_protobuf_tickers(&config.source.protobuf_path, vec![]);

    let report = start_export(&config, run_date()).await.unwrap();

    assert_eq!(report.summary, ExportSummary::default());
    let content = std::fs::read_to_string(expected_output(dir.path())).unwrap();
    assert_eq!(content, HEADER);
}

#[tokio::test]
async fn repeated_runs_on_same_date_are_byte_identical() {
    init_test_tracing();
    let dir = temp_dir();
    let config = csv_config(dir.path());

    write_parquet_tickers(
        &config.source.parquet_path,
        &[
            ParquetTickerRow::new("B", "Bravo", "2000", "second", 2),
            ParquetTickerRow::new("A", "Alpha", "1000", "first", 1),
        ],
    );
    write_protobuf_tickers(
        &config.source.protobuf_path,
        vec![ticker("B", "Bravo again", "2000", "", 3)],
    );

    start_export(&config, run_date()).await.unwrap();
    let first = std::fs::read(expected_output(dir.path())).unwrap();

    start_export(&config, run_date()).await.unwrap();
    let second = std::fs::read(expected_output(dir.path())).unwrap();

    assert_eq!(first, second);

    let next_day = run_date().succ_opt().unwrap();
    let report = start_export(&config, next_day).await.unwrap();

    assert_eq!(
        report.output_path,
        Some(dir.path().join("reference-tickers_2024-03-16.csv"))
    );
    assert!(expected_output(dir.path()).exists());
}

#[tokio::test]
async fn missing_parquet_file_produces_no_output() {
    init_test_tracing();
    let dir = temp_dir();
    let config = csv_config(dir.path());

    write_protobuf_tickers(
        &config.source.protobuf_path,
        vec![ticker("AAA", "Alpha Inc", "1311", "", 5)],
    );

    let err = start_export(&config, run_date()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(!expected_output(dir.path()).exists());
}

#[tokio::test]
async fn malformed_protobuf_file_produces_no_output() {
    init_test_tracing();
    let dir = temp_dir();
    let config = csv_config(dir.path());

    write_parquet_tickers(
        &config.source.parquet_path,
        &[ParquetTickerRow::new("ZZZ", "Zeta Corp", "7372", "", 10)],
    );
    // A length-delimited field whose declared length runs past the end of the payload.
    std::fs::write(&config.source.protobuf_path, [0x0a, 0x10, 0x0a]).unwrap();

    let err = start_export(&config, run_date()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeError);
    assert!(!expected_output(dir.path()).exists());
}

#[tokio::test]
async fn missing_output_directory_is_destination_unavailable() {
    init_test_tracing();
    let dir = temp_dir();
    let mut config = csv_config(dir.path());
    config.destination = DestinationConfig::Csv {
        output_dir: dir.path().join("missing"),
        file_prefix: DestinationConfig::DEFAULT_FILE_PREFIX.to_string(),
    };

    write_parquet_tickers(&config.source.parquet_path, &[]);
    write_protobuf_tickers(&config.source.protobuf_path, vec![]);

    let err = start_export(&config, run_date()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DestinationUnavailable);
}

#[tokio::test]
async fn memory_destination_writes_no_file() {
    init_test_tracing();
    let dir = temp_dir();
    let mut config = csv_config(dir.path());
    config.destination = DestinationConfig::Memory;

    write_parquet_tickers(
        &config.source.parquet_path,
        &[ParquetTickerRow::new("ZZZ", "Zeta Corp", "7372", "", 10)],
    );
    write_protobuf_tickers(
        &config.source.protobuf_path,
        vec![ticker("AAA", "Alpha Inc", "1311", "", 5)],
    );

    let report = start_export(&config, run_date()).await.unwrap();

    assert_eq!(report.output_path, None);
    assert_eq!(report.summary.written_rows, 2);
    assert!(!expected_output(dir.path()).exists());
}

#[tokio::test]
async fn invalid_configuration_is_config_error() {
    init_test_tracing();
    let dir = temp_dir();
    let mut config = csv_config(dir.path());
    config.destination = DestinationConfig::Csv {
        output_dir: dir.path().to_path_buf(),
        file_prefix: "nested/tickers".to_string(),
    };

    let err = start_export(&config, run_date()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigError);
    assert!(err.detail().unwrap().contains("file_prefix"));
}
