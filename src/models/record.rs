//! Recipient records and the filters applied to them

use serde::{Deserialize, Serialize};

/// One row of tabular input, coerced to text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based row number in the source sheet, header row included
    pub row: usize,
    pub customer: String,
    pub code: String,
    pub street: String,
    pub city: String,
}

impl Record {
    pub fn new(
        customer: impl Into<String>,
        code: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            row: 0,
            customer: customer.into(),
            code: code.into(),
            street: street.into(),
            city: city.into(),
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = row;
        self
    }
}

/// Column labels expected in the header row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLabels {
    pub customer: String,
    pub code: String,
    pub street: String,
    pub city: String,
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            customer: "KLANTNAAM".to_string(),
            code: "EAN".to_string(),
            street: "STRAAT".to_string(),
            city: "STAD".to_string(),
        }
    }
}

impl ColumnLabels {
    pub fn all(&self) -> [&str; 4] {
        [&self.customer, &self.code, &self.street, &self.city]
    }
}

/// Optional record filters. Unset or empty filters let every record through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Case-sensitive substring the street must contain
    pub street_contains: Option<String>,
    pub customer: Option<String>,
    pub code: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        active(&self.street_contains).is_none()
            && active(&self.customer).is_none()
            && active(&self.code).is_none()
    }

    /// Apply the street, customer and code filters, in that order
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        let mut records = records;

        if let Some(needle) = active(&self.street_contains) {
            records.retain(|r| !r.street.is_empty() && r.street.contains(needle));
        }
        if let Some(customer) = active(&self.customer) {
            records.retain(|r| r.customer == customer);
        }
        if let Some(code) = active(&self.code) {
            records.retain(|r| r.code == code);
        }

        records
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
