use std::future::Future;

use crate::error::EtlResult;
use crate::types::Company;

/// Trait for systems that provide company records to the export pipeline.
///
/// [`Source`] implementations decode one input into [`Company`] records, one per source row,
/// in the order the rows appear in the input. A source is read exactly once per run and must
/// release every resource it acquired before returning, whether it succeeds or fails.
///
/// Failures are reported as [`crate::error::ErrorKind::SourceUnavailable`] when the input
/// cannot be opened or read, and [`crate::error::ErrorKind::DecodeError`] when its content does
/// not match the expected schema.
pub trait Source {
    /// Returns the name of the source.
    fn name() -> &'static str;

    /// Reads every record of the source.
    fn read_companies(&self) -> impl Future<Output = EtlResult<Vec<Company>>> + Send;
}
