//! Tracing setup shared by the exporter binary and its tests.

pub mod tracing;
