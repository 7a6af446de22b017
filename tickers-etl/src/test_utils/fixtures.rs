//! Writers for Parquet and protobuf input files used by tests.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{RecordBatch, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::ArrowWriter;
use prost::Message;
use tempfile::TempDir;

use crate::source::protobuf_file::{DailyTickerFile, Ticker};

/// Creates a temporary directory removed when the returned guard is dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temporary directory")
}

/// One row of the Parquet reference ticker file, including the columns that are not exported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParquetTickerRow {
    pub ticker: String,
    pub name: String,
    pub currency: String,
    pub sic_code: String,
    pub phone: String,
    pub homepage: String,
    pub description: String,
    pub employees: u64,
    pub round_lot: u64,
}

impl ParquetTickerRow {
    /// Creates a row with the exported columns set and every other column left empty.
    pub fn new(
        ticker: &str,
        name: &str,
        sic_code: &str,
        description: &str,
        employees: u64,
    ) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
            sic_code: sic_code.to_string(),
            description: description.to_string(),
            employees,
            ..Default::default()
        }
    }
}

/// Returns the schema of the Parquet reference ticker file.
pub fn parquet_tickers_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("Ticker", DataType::Utf8, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Currency", DataType::Utf8, false),
        Field::new("SICCode", DataType::Utf8, false),
        Field::new("Phone", DataType::Utf8, false),
        Field::new("Homepage", DataType::Utf8, false),
        Field::new("Description", DataType::Utf8, false),
        Field::new("Employees", DataType::UInt64, false),
        Field::new("RoundLot", DataType::UInt64, false),
    ]))
}

/// Writes `rows` to a Parquet file at `path` using the reference ticker schema.
pub fn write_parquet_tickers(path: &Path, rows: &[ParquetTickerRow]) {
    fn strings(rows: &[ParquetTickerRow], field: fn(&ParquetTickerRow) -> &str) -> StringArray {
        StringArray::from_iter_values(rows.iter().map(field))
    }

    let batch = RecordBatch::try_new(
        parquet_tickers_schema(),
        vec![
            Arc::new(strings(rows, |row| row.ticker.as_str())),
            Arc::new(strings(rows, |row| row.name.as_str())),
            Arc::new(strings(rows, |row| row.currency.as_str())),
            Arc::new(strings(rows, |row| row.sic_code.as_str())),
            Arc::new(strings(rows, |row| row.phone.as_str())),
            Arc::new(strings(rows, |row| row.homepage.as_str())),
            Arc::new(strings(rows, |row| row.description.as_str())),
            Arc::new(UInt64Array::from_iter_values(
                rows.iter().map(|row| row.employees),
            )),
            Arc::new(UInt64Array::from_iter_values(
                rows.iter().map(|row| row.round_lot),
            )),
        ],
    )
    .expect("failed to build reference ticker record batch");

    write_parquet_batch(path, &batch);
}

/// Writes a single record batch to a Parquet file at `path`.
pub fn write_parquet_batch(path: &Path, batch: &RecordBatch) {
    let file = File::create(path).expect("failed to create parquet file");
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).expect("failed to create arrow writer");

    if batch.num_rows() > 0 {
        writer.write(batch).expect("failed to write record batch");
    }
    writer.close().expect("failed to close arrow writer");
}

/// Builds a protobuf [`Ticker`] with every field set.
pub fn ticker(symbol: &str, company: &str, code: &str, description: &str, size: u64) -> Ticker {
    Ticker {
        symbol: symbol.to_string(),
        company: company.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        size,
    }
}

/// Writes `tickers` as a serialized [`DailyTickerFile`] to `path`.
pub fn write_protobuf_tickers(path: &Path, tickers: Vec<Ticker>) {
    let data = DailyTickerFile { tickers }.encode_to_vec();
    std::fs::write(path, data).expect("failed to write protobuf file");
}
