//! Destination writing the exported companies to a date-stamped CSV file.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::destination::Destination;
use crate::error::{ErrorKind, EtlResult};
use crate::etl_error;
use crate::types::{COMPANY_CSV_HEADER, Company};

/// File name prefix used when none is configured.
pub const DEFAULT_FILE_PREFIX: &str = "reference-tickers";

/// Date format embedded in the output file name (ISO-8601 calendar date).
const FILE_NAME_DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes companies to `<output_dir>/<file_prefix>_<YYYY-MM-DD>.csv`.
///
/// The first line is the fixed [`COMPANY_CSV_HEADER`]; every following line holds one company.
/// Values are quoted only when they contain a delimiter, a quote or a line break, and lines end
/// with `\n`. Writing twice for the same run date replaces the earlier file.
///
/// A failure while writing rows leaves the partially written file in place.
#[derive(Debug, Clone)]
pub struct CsvDestination {
    output_dir: PathBuf,
    file_prefix: String,
}

impl CsvDestination {
    /// Creates a destination writing into `output_dir` with the given file name prefix.
    pub fn new(output_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    /// Returns the name of the file written for `run_date`.
    pub fn file_name(&self, run_date: NaiveDate) -> String {
        format!(
            "{}_{}.csv",
            self.file_prefix,
            run_date.format(FILE_NAME_DATE_FORMAT)
        )
    }

    /// Returns the full path of the file written for `run_date`.
    pub fn output_path(&self, run_date: NaiveDate) -> PathBuf {
        self.output_dir.join(self.file_name(run_date))
    }
}

impl Destination for CsvDestination {
    fn name() -> &'static str {
        "csv"
    }

    async fn write_companies(&self, companies: &[Company], run_date: NaiveDate) -> EtlResult<()> {
        let path = self.output_path(run_date);
        let records: Vec<[String; 5]> = companies.iter().map(Company::csv_record).collect();
        let rows = records.len();

        debug!(path = %path.display(), rows, "writing companies to csv file");
        let written_path = path.clone();
        tokio::task::spawn_blocking(move || write_csv_file(&written_path, &records)).await??;
        info!(path = %path.display(), rows, "wrote companies to csv file");

        Ok(())
    }
}

/// Creates (or truncates) the file at `path` and writes the header followed by `records`.
///
/// All buffered output is flushed before returning success.
fn write_csv_file(path: &Path, records: &[[String; 5]]) -> EtlResult<()> {
    let file = File::create(path).map_err(|err| {
        etl_error!(
            ErrorKind::DestinationUnavailable,
            "Output file could not be created",
            path.display(),
            source: err
        )
    })?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    writer.write_record(COMPANY_CSV_HEADER).map_err(|err| {
        etl_error!(
            ErrorKind::WriteError,
            "Header could not be written to output file",
            path.display(),
            source: err
        )
    })?;

    for record in records {
        writer.write_record(record).map_err(|err| {
            etl_error!(
                ErrorKind::WriteError,
                "Row could not be written to output file",
                format!("{}: row for ticker `{}`", path.display(), record[0]),
                source: err
            )
        })?;
    }

    writer.flush().map_err(|err| {
        etl_error!(
            ErrorKind::WriteError,
            "Output file could not be flushed",
            path.display(),
            source: err
        )
    })?;

    Ok(())
}
