use serde::{Deserialize, Serialize};

use crate::error::MappingError;

pub const DEFAULT_YEAR_COLUMN: &str = "Year";
pub const DEFAULT_DATE_COLUMN: &str = "FullDate";
pub const DEFAULT_REFERENCE_COLUMN: &str = "Reference Name";

/// Where a row's calendar date comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateColumns {
    /// One column holding a full date string (`2020-03-25`, `Mar 25, 2020`, ...).
    Single { column: String },
    /// Separate year, month, and day columns.
    Split {
        year: String,
        month: String,
        day: String,
    },
}

impl Default for DateColumns {
    fn default() -> Self {
        Self::Single {
            column: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

/// Maps source table headers onto the fields a record needs.
///
/// Deserializes from JSON such as:
///
/// ```json
/// { "year": "Year",
///   "date": { "kind": "split", "year": "Y", "month": "M", "day": "D" },
///   "reference": "Reference Name" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub year: String,
    pub date: DateColumns,
    pub reference: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR_COLUMN.to_string(),
            date: DateColumns::default(),
            reference: DEFAULT_REFERENCE_COLUMN.to_string(),
        }
    }
}

impl ColumnMapping {
    /// Rejects mappings with blank column names.
    pub fn validate(&self) -> Result<(), MappingError> {
        if self.year.trim().is_empty() {
            return Err(MappingError::EmptyColumn("year"));
        }
        if self.reference.trim().is_empty() {
            return Err(MappingError::EmptyColumn("reference"));
        }
        match &self.date {
            DateColumns::Single { column } if column.trim().is_empty() => {
                Err(MappingError::EmptyColumn("date"))
            }
            DateColumns::Split { year, month, day } => {
                if year.trim().is_empty() {
                    Err(MappingError::EmptyColumn("date.year"))
                } else if month.trim().is_empty() {
                    Err(MappingError::EmptyColumn("date.month"))
                } else if day.trim().is_empty() {
                    Err(MappingError::EmptyColumn("date.day"))
                } else {
                    Ok(())
                }
            }
            DateColumns::Single { .. } => Ok(()),
        }
    }

    /// All column names this mapping consumes, in mapping order.
    pub fn mapped_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.year.as_str()];
        match &self.date {
            DateColumns::Single { column } => columns.push(column),
            DateColumns::Split { year, month, day } => {
                columns.extend([year.as_str(), month.as_str(), day.as_str()]);
            }
        }
        columns.push(&self.reference);
        columns
    }
}
