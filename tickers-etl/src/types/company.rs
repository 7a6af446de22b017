/// Column names of the exported CSV file, in output order.
pub const COMPANY_CSV_HEADER: [&str; 5] = [
    "Ticker",
    "Name",
    "SICCode",
    "Description",
    "TotalEmployees",
];

/// Normalized company reference record shared by every source.
///
/// A [`Company`] is built once per decoded source row and never modified afterwards; the
/// fields are only reachable through accessors. Sources that have no equivalent for a field
/// supply the field type's default (empty string, zero).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    ticker: String,
    name: String,
    sic_code: String,
    description: String,
    total_employees: u64,
}

impl Company {
    /// Creates a new company record.
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        sic_code: impl Into<String>,
        description: impl Into<String>,
        total_employees: u64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            sic_code: sic_code.into(),
            description: description.into(),
            total_employees,
        }
    }

    /// Returns the ticker symbol identifying the company within its source.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Returns the company's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the industry classification (SIC) code.
    pub fn sic_code(&self) -> &str {
        &self.sic_code
    }

    /// Returns the free-text description, which may be empty.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the employee count, where zero also stands for "unknown".
    pub fn total_employees(&self) -> u64 {
        self.total_employees
    }

    /// Returns the record's fields in [`COMPANY_CSV_HEADER`] order, rendered as text.
    pub fn csv_record(&self) -> [String; 5] {
        [
            self.ticker.clone(),
            self.name.clone(),
            self.sic_code.clone(),
            self.description.clone(),
            self.total_employees.to_string(),
        ]
    }
}
