mod base;
pub mod parquet_file;
pub mod protobuf_file;

pub use base::Source;
pub use parquet_file::ParquetSource;
pub use protobuf_file::ProtobufSource;
