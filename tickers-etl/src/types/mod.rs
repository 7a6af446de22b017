//! Common types used throughout the export.

mod company;
mod summary;

pub use company::*;
pub use summary::*;
