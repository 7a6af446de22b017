mod base;
pub mod csv_file;
pub mod memory;

pub use base::Destination;
pub use csv_file::CsvDestination;
pub use memory::MemoryDestination;
