//! Shared configuration types for the exporter.

mod base;
mod destination;
mod export;
mod source;

pub use base::ValidationError;
pub use destination::DestinationConfig;
pub use export::ExportConfig;
pub use source::SourceConfig;
