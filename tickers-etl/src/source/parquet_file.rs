//! Columnar source reading company records from a Parquet file.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray, RecordBatch, StringArray, UInt64Array};
use arrow::compute::{CastOptions, cast_with_options};
use arrow::datatypes::{DataType, UInt64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::{debug, info};

use crate::error::{ErrorKind, EtlResult};
use crate::source::Source;
use crate::types::Company;
use crate::{bail, etl_error};

/// Column holding the ticker symbol.
pub const TICKER_COLUMN_NAME: &str = "Ticker";
/// Column holding the company name.
pub const NAME_COLUMN_NAME: &str = "Name";
/// Column holding the SIC classification code.
pub const SIC_CODE_COLUMN_NAME: &str = "SICCode";
/// Column holding the free-text description.
pub const DESCRIPTION_COLUMN_NAME: &str = "Description";
/// Column holding the employee count.
pub const EMPLOYEES_COLUMN_NAME: &str = "Employees";

/// Columns that are mapped into [`Company`]. Any other column in the file is skipped.
const MAPPED_COLUMN_NAMES: [&str; 5] = [
    TICKER_COLUMN_NAME,
    NAME_COLUMN_NAME,
    SIC_CODE_COLUMN_NAME,
    DESCRIPTION_COLUMN_NAME,
    EMPLOYEES_COLUMN_NAME,
];

/// Reads company records from a Parquet file, one record per row in file order.
///
/// The file is expected to carry the `Ticker`, `Name`, `SICCode`, `Description` and
/// `Employees` columns. Additional columns such as `Currency`, `Phone`, `Homepage` and
/// `RoundLot` are decoded with their row group but never reach the produced records.
/// Null cells decode to an empty string or zero.
#[derive(Debug, Clone)]
pub struct ParquetSource {
    path: PathBuf,
}

impl ParquetSource {
    /// Creates a source reading from the Parquet file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for ParquetSource {
    fn name() -> &'static str {
        "parquet"
    }

    async fn read_companies(&self) -> EtlResult<Vec<Company>> {
        let path = self.path.clone();

        debug!(path = %path.display(), "reading parquet source");
        let companies = tokio::task::spawn_blocking(move || read_parquet_file(&path)).await??;
        info!(
            path = %self.path.display(),
            rows = companies.len(),
            "read companies from parquet source"
        );

        Ok(companies)
    }
}

/// Decodes every row of the Parquet file at `path`.
///
/// The file handle is owned by the reader and released when this function returns.
fn read_parquet_file(path: &Path) -> EtlResult<Vec<Company>> {
    let file = File::open(path).map_err(|err| {
        etl_error!(
            ErrorKind::SourceUnavailable,
            "Parquet file could not be opened",
            path.display(),
            source: err
        )
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|err| with_path(err.into(), path))?;

    for field in builder.schema().fields() {
        if !MAPPED_COLUMN_NAMES.contains(&field.name().as_str()) {
            debug!(column = %field.name(), "skipping unmapped parquet column");
        }
    }

    let reader = builder.build().map_err(|err| with_path(err.into(), path))?;

    let mut companies = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|err| with_path(err.into(), path))?;
        append_batch(&batch, &mut companies).map_err(|err| with_path(err, path))?;
    }

    Ok(companies)
}

/// Appends one [`Company`] per row of `batch` to `companies`, preserving row order.
fn append_batch(batch: &RecordBatch, companies: &mut Vec<Company>) -> EtlResult<()> {
    let tickers = column_as(batch, TICKER_COLUMN_NAME, &DataType::Utf8)?;
    let names = column_as(batch, NAME_COLUMN_NAME, &DataType::Utf8)?;
    let sic_codes = column_as(batch, SIC_CODE_COLUMN_NAME, &DataType::Utf8)?;
    let descriptions = column_as(batch, DESCRIPTION_COLUMN_NAME, &DataType::Utf8)?;
    let employees = column_as(batch, EMPLOYEES_COLUMN_NAME, &DataType::UInt64)?;

    let tickers = tickers.as_string::<i32>();
    let names = names.as_string::<i32>();
    let sic_codes = sic_codes.as_string::<i32>();
    let descriptions = descriptions.as_string::<i32>();
    let employees = employees.as_primitive::<UInt64Type>();

    companies.reserve(batch.num_rows());
    for row in 0..batch.num_rows() {
        companies.push(Company::new(
            string_value(tickers, row),
            string_value(names, row),
            string_value(sic_codes, row),
            string_value(descriptions, row),
            u64_value(employees, row),
        ));
    }

    Ok(())
}

/// Looks up the column `name` and converts it to `data_type`.
///
/// Text columns must hold strings (plain, large, view or dictionary encoded) and the employee column must
/// hold integers. The conversion is strict: values that cannot be represented in `data_type`
/// (for example a negative employee count) fail instead of silently turning into nulls.
fn column_as(batch: &RecordBatch, name: &'static str, data_type: &DataType) -> EtlResult<ArrayRef> {
    let Some(column) = batch.column_by_name(name) else {
        bail!(
            ErrorKind::DecodeError,
            "Parquet file is missing a required column",
            name
        );
    };

    let unexpected_type = || {
        format!(
            "column `{name}` of type {} cannot be read as {data_type}",
            column.data_type()
        )
    };

    if !is_lossless_source_type(column.data_type(), data_type) {
        bail!(
            ErrorKind::DecodeError,
            "Parquet column has an unexpected type",
            detail = unexpected_type()
        );
    }

    let options = CastOptions {
        safe: false,
        ..Default::default()
    };

    cast_with_options(column, data_type, &options).map_err(|err| {
        etl_error!(
            ErrorKind::DecodeError,
            "Parquet column holds a value that cannot be converted",
            detail = unexpected_type(),
            source: err
        )
    })
}

/// Returns whether a column of type `source` can be cast to `target` without losing data.
fn is_lossless_source_type(source: &DataType, target: &DataType) -> bool {
    match target {
        DataType::Utf8 => match source {
            DataType::Dictionary(_, values) => is_string_type(values),
            other => is_string_type(other),
        },
        DataType::UInt64 => source.is_integer(),
        _ => source == target,
    }
}

fn is_string_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    )
}

fn string_value(array: &StringArray, row: usize) -> String {
    if array.is_null(row) {
        return String::new();
    }

    array.value(row).to_owned()
}

fn u64_value(array: &UInt64Array, row: usize) -> u64 {
    if array.is_null(row) {
        return 0;
    }

    array.value(row)
}

/// Replaces the detail of a decoding error with the path of the file being decoded.
fn with_path(err: crate::error::EtlError, path: &Path) -> crate::error::EtlError {
    let detail = match err.detail() {
        Some(detail) => format!("{}: {detail}", path.display()),
        None => path.display().to_string(),
    };

    etl_error!(err.kind(), "Parquet file could not be decoded", detail, source: err)
}
