//! Export pipeline driving sources, merge, sort and destination in order.

use chrono::NaiveDate;
use tracing::info;

use crate::destination::Destination;
use crate::error::EtlResult;
use crate::merge::{merge_companies, sort_companies};
use crate::source::Source;
use crate::types::ExportSummary;

/// Runs one export: reads the columnar source, then the binary message source, merges both
/// record sets, orders them by ticker and hands the result to the destination.
///
/// Every stage consumes the full output of the previous one. The first failure ends the run:
/// if the columnar source fails, the binary message source is never read, and if either source
/// fails, nothing is written.
#[derive(Debug)]
pub struct Pipeline<C, B, D> {
    columnar: C,
    binary: B,
    destination: D,
}

impl<C, B, D> Pipeline<C, B, D>
where
    C: Source,
    B: Source,
    D: Destination,
{
    /// Creates a pipeline from its two sources and its destination.
    pub fn new(columnar: C, binary: B, destination: D) -> Self {
        Self {
            columnar,
            binary,
            destination,
        }
    }

    /// Runs the export for `run_date`.
    pub async fn run(&self, run_date: NaiveDate) -> EtlResult<ExportSummary> {
        info!(source = C::name(), "reading columnar source");
        let columnar = self.columnar.read_companies().await?;

        info!(source = B::name(), "reading binary message source");
        let binary = self.binary.read_companies().await?;

        let summary = ExportSummary {
            columnar_rows: columnar.len(),
            binary_rows: binary.len(),
            written_rows: columnar.len() + binary.len(),
        };

        let mut companies = merge_companies(columnar, binary);
        sort_companies(&mut companies);

        info!(
            destination = D::name(),
            %run_date,
            rows = companies.len(),
            "writing merged companies"
        );
        self.destination
            .write_companies(&companies, run_date)
            .await?;

        info!(
            columnar_rows = summary.columnar_rows,
            binary_rows = summary.binary_rows,
            written_rows = summary.written_rows,
            "export completed"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::MemoryDestination;
    use crate::error::ErrorKind;
    use crate::test_utils::source::ProbeSource;
    use crate::types::Company;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn sorted_output_overrides_source_order() {
        let columnar = ProbeSource::new(vec![Company::new("ZZZ", "", "", "", 10)]);
        let binary = ProbeSource::new(vec![Company::new("AAA", "", "", "", 5)]);
        let destination = MemoryDestination::new();

        let pipeline = Pipeline::new(columnar, binary, destination.clone());
        let summary = pipeline.run(run_date()).await.unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                columnar_rows: 1,
                binary_rows: 1,
                written_rows: 2,
            }
        );
        assert_eq!(
            destination.writes().await,
            vec![(
                run_date(),
                vec![
                    Company::new("AAA", "", "", "", 5),
                    Company::new("ZZZ", "", "", "", 10),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn duplicate_tickers_keep_source_order() {
        let columnar = ProbeSource::new(vec![Company::new("DUP", "columnar", "", "", 1)]);
        let binary = ProbeSource::new(vec![
            Company::new("DUP", "binary", "", "", 2),
            Company::new("ABC", "binary", "", "", 3),
        ]);
        let destination = MemoryDestination::new();

        Pipeline::new(columnar, binary, destination.clone())
            .run(run_date())
            .await
            .unwrap();

        let names: Vec<_> = destination
            .last_companies()
            .await
            .unwrap()
            .iter()
            .map(|company| format!("{}:{}", company.ticker(), company.name()))
            .collect();
        assert_eq!(names, ["ABC:binary", "DUP:columnar", "DUP:binary"]);
    }

    #[tokio::test]
    async fn columnar_failure_skips_binary_source_and_destination() {
        let columnar = ProbeSource::failing(ErrorKind::SourceUnavailable);
        let binary = ProbeSource::new(vec![Company::new("AAA", "", "", "", 5)]);
        let binary_probe = binary.clone();
        let destination = MemoryDestination::new();

        let err = Pipeline::new(columnar, binary, destination.clone())
            .run(run_date())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert_eq!(binary_probe.reads(), 0);
        assert!(destination.writes().await.is_empty());
    }

    #[tokio::test]
    async fn binary_failure_discards_columnar_records() {
        let columnar = ProbeSource::new(vec![Company::new("ZZZ", "", "", "", 10)]);
        let columnar_probe = columnar.clone();
        let binary = ProbeSource::failing(ErrorKind::DecodeError);
        let destination = MemoryDestination::new();

        let err = Pipeline::new(columnar, binary, destination.clone())
            .run(run_date())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert_eq!(columnar_probe.reads(), 1);
        assert!(destination.writes().await.is_empty());
    }
}
