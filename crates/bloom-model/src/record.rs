use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Date representation as found in the source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DateSource {
    Full(String),
    Parts {
        year: String,
        month: String,
        day: String,
    },
}

/// One source row before normalization. Empty cells are kept as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 1-based data row number in the source table.
    pub row: usize,
    pub year: String,
    pub date: DateSource,
    pub reference_name: String,
    /// Unmapped columns, carried through untouched.
    pub extra: BTreeMap<String, String>,
}

/// A row whose year and date both parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub row: usize,
    pub year: i32,
    pub full_date: NaiveDate,
    pub reference_name: String,
    pub extra: BTreeMap<String, String>,
}

/// A row flagged invalid, retained for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecord {
    pub raw: RawRecord,
    pub error: ParseError,
}

impl InvalidRecord {
    pub fn row(&self) -> usize {
        self.raw.row
    }
}
