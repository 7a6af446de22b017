//! Testing utilities for export pipelines.
//!
//! - [`fixtures`] writes Parquet and protobuf input files into temporary directories.
//! - [`source`] provides [`source::ProbeSource`], an in-memory source that records its reads.
pub mod fixtures;
pub mod source;
