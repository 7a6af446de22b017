/// Row counts observed during a single export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    /// Number of records decoded from the columnar source.
    pub columnar_rows: usize,
    /// Number of records decoded from the binary message source.
    pub binary_rows: usize,
    /// Number of records handed to the destination.
    pub written_rows: usize,
}
