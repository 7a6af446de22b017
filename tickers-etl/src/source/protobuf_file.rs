//! Binary message source reading company records from a protobuf file.

use std::path::PathBuf;

use prost::Message;
use tracing::{debug, info};

use crate::error::{ErrorKind, EtlResult};
use crate::etl_error;
use crate::source::Source;
use crate::types::Company;

/// Top-level message of a daily ticker file.
///
/// ```proto
/// message DailyTickerFile {
///   repeated Ticker tickers = 1;
/// }
/// ```
#[derive(Clone, PartialEq, Message)]
pub struct DailyTickerFile {
    #[prost(message, repeated, tag = "1")]
    pub tickers: Vec<Ticker>,
}

/// Per-company message carried by a [`DailyTickerFile`].
///
/// All fields follow proto3 semantics: a field the writer left unset decodes to its type's
/// default value.
///
/// ```proto
/// message Ticker {
///   string symbol = 1;
///   string company = 2;
///   string code = 3;
///   string description = 4;
///   uint64 size = 5;
/// }
/// ```
#[derive(Clone, PartialEq, Message)]
pub struct Ticker {
    #[prost(string, tag = "1")]
    pub symbol: String,
    #[prost(string, tag = "2")]
    pub company: String,
    #[prost(string, tag = "3")]
    pub code: String,
    #[prost(string, tag = "4")]
    pub description: String,
    #[prost(uint64, tag = "5")]
    pub size: u64,
}

impl From<Ticker> for Company {
    fn from(ticker: Ticker) -> Self {
        Company::new(
            ticker.symbol,
            ticker.company,
            ticker.code,
            ticker.description,
            ticker.size,
        )
    }
}

/// Reads company records from a file holding a single serialized [`DailyTickerFile`].
///
/// The whole file is loaded into memory before decoding. Records are produced in the order
/// of the `tickers` list.
#[derive(Debug, Clone)]
pub struct ProtobufSource {
    path: PathBuf,
}

impl ProtobufSource {
    /// Creates a source reading from the protobuf file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for ProtobufSource {
    fn name() -> &'static str {
        "protobuf"
    }

    async fn read_companies(&self) -> EtlResult<Vec<Company>> {
        debug!(path = %self.path.display(), "reading protobuf source");

        let data = tokio::fs::read(&self.path).await.map_err(|err| {
            etl_error!(
                ErrorKind::SourceUnavailable,
                "Protobuf file could not be read",
                self.path.display(),
                source: err
            )
        })?;

        let companies = decode_companies(&data).map_err(|err| {
            etl_error!(
                ErrorKind::DecodeError,
                "Protobuf file could not be decoded",
                self.path.display(),
                source: err
            )
        })?;

        info!(
            path = %self.path.display(),
            bytes = data.len(),
            rows = companies.len(),
            "read companies from protobuf source"
        );

        Ok(companies)
    }
}

/// Decodes a serialized [`DailyTickerFile`] into companies, preserving list order.
pub fn decode_companies(data: &[u8]) -> Result<Vec<Company>, prost::DecodeError> {
    let file = DailyTickerFile::decode(data)?;

    Ok(file.tickers.into_iter().map(Company::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{temp_dir, ticker, write_protobuf_tickers};

    #[tokio::test]
    async fn reads_tickers_in_list_order() {
        let dir = temp_dir();
        let path = dir.path().join("reference-tickers.hooli");
        write_protobuf_tickers(
            &path,
            vec![
                ticker("MSFT", "Microsoft", "7372", "Windows", 221_000),
                ticker("AAPL", "Apple", "3571", "Phones", 161_000),
            ],
        );

        let companies = ProtobufSource::new(&path).read_companies().await.unwrap();

        assert_eq!(
            companies,
            vec![
                Company::new("MSFT", "Microsoft", "7372", "Windows", 221_000),
                Company::new("AAPL", "Apple", "3571", "Phones", 161_000),
            ]
        );
    }

    #[test]
    fn unset_fields_decode_to_defaults() {
        let only_symbol = Ticker {
            symbol: "AAA".to_string(),
            ..Default::default()
        };
        let data = DailyTickerFile {
            tickers: vec![only_symbol],
        }
        .encode_to_vec();

        let companies = decode_companies(&data).unwrap();

        assert_eq!(companies, vec![Company::new("AAA", "", "", "", 0)]);
    }

    #[test]
    fn empty_payload_decodes_to_no_companies() {
        let companies = decode_companies(&[]).unwrap();

        assert!(companies.is_empty());
    }

    #[test]
    fn truncated_payload_fails_to_decode() {
        let data = DailyTickerFile {
            tickers: vec![ticker("TRNC", "Truncated", "0000", "Cut short", 1)],
        }
        .encode_to_vec();

        assert!(decode_companies(&data[..data.len() - 3]).is_err());
    }

    #[tokio::test]
    async fn malformed_file_is_a_decode_error() {
        let dir = temp_dir();
        let path = dir.path().join("broken.hooli");
        // Field 1 declared as length-delimited with a length far beyond the payload.
        std::fs::write(&path, [0x0a, 0xff, 0x01, 0x00]).unwrap();

        let err = ProtobufSource::new(&path).read_companies().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DecodeError);
        assert!(err.detail().unwrap().contains("broken.hooli"));
    }

    #[tokio::test]
    async fn missing_file_is_source_unavailable() {
        let dir = temp_dir();
        let path = dir.path().join("absent.hooli");

        let err = ProtobufSource::new(&path).read_companies().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }
}
