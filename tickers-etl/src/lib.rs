//! Export of company reference tickers.
//!
//! Reads company records from a Parquet file and a protobuf file, normalizes both into
//! [`types::Company`], merges them (Parquet records first), orders the result by ticker with a
//! stable sort and writes it to a date-stamped CSV file.

pub mod destination;
pub mod error;
mod macros;
pub mod merge;
pub mod pipeline;
pub mod source;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
