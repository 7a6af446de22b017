//! Combining and ordering of the records read from every source.

use crate::types::Company;

/// Concatenates the records of both sources into one working set.
///
/// All columnar records come first, in their original order, followed by all binary message
/// records, in their original order. Records sharing a ticker are all kept.
pub fn merge_companies(columnar: Vec<Company>, binary: Vec<Company>) -> Vec<Company> {
    let mut merged = columnar;
    merged.extend(binary);

    merged
}

/// Orders `companies` by ticker using byte-wise comparison.
///
/// The sort is stable: records with equal tickers keep their relative order.
pub fn sort_companies(companies: &mut [Company]) {
    companies.sort_by(|a, b| a.ticker().as_bytes().cmp(b.ticker().as_bytes()));
}
