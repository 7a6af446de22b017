use chrono::NaiveDate;
use std::future::Future;

use crate::error::EtlResult;
use crate::types::Company;

/// Trait for systems that receive the ordered company records of an export run.
///
/// [`Destination`] implementations define how the final record set is persisted. The records
/// are handed over fully materialized and already ordered; a destination must keep that order.
///
/// The run date is supplied by the caller instead of being read from the clock, so writing the
/// same records for the same date always has the same effect.
pub trait Destination {
    /// Returns the name of the destination.
    fn name() -> &'static str;

    /// Writes all `companies` for the run taking place on `run_date`.
    ///
    /// Note that this method is called even when no source produced a record. In that case it
    /// receives an empty slice and is still expected to produce its (empty) output.
    fn write_companies(
        &self,
        companies: &[Company],
        run_date: NaiveDate,
    ) -> impl Future<Output = EtlResult<()>> + Send;
}
