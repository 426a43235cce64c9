//! Row normalization and date axis construction.

use std::collections::{BTreeMap, BTreeSet};

use bloom_ingest::CsvTable;
use bloom_model::{
    ColumnMapping, DateAxis, DateColumns, DateSource, InvalidRecord, ParseError, RawRecord,
    Record,
};
use tracing::{debug, warn};

use crate::datetime::{parse_date_parts, parse_full_date, parse_year};

/// Output of one normalization pass.
///
/// Rows that fail to parse are kept in `invalid` and left off the axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    pub records: Vec<Record>,
    pub invalid: Vec<InvalidRecord>,
    pub axis: DateAxis,
}

impl Normalized {
    pub fn total(&self) -> usize {
        self.records.len() + self.invalid.len()
    }

    /// True when there was input but no row survived.
    pub fn all_invalid(&self) -> bool {
        self.records.is_empty() && !self.invalid.is_empty()
    }

    /// Axis index of a record's date.
    pub fn axis_position(&self, record: &Record) -> Option<usize> {
        self.axis.position(record.full_date)
    }

    /// Smallest and largest year across valid records.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateNormalizer {
    mapping: ColumnMapping,
}

impl DateNormalizer {
    pub fn new(mapping: ColumnMapping) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Normalizes every row of `table`.
    pub fn normalize_table(&self, table: &CsvTable) -> Normalized {
        self.normalize(&self.extract(table))
    }

    pub fn normalize(&self, raw: &[RawRecord]) -> Normalized {
        let mut records = Vec::with_capacity(raw.len());
        let mut invalid = Vec::new();
        for row in raw {
            match self.normalize_record(row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(row = row.row, %error, "row excluded from date axis");
                    invalid.push(InvalidRecord {
                        raw: row.clone(),
                        error,
                    });
                }
            }
        }
        let axis = DateAxis::from_dates(records.iter().map(|r| r.full_date));
        debug!(
            valid = records.len(),
            invalid = invalid.len(),
            axis = axis.len(),
            "normalized records"
        );
        Normalized {
            records,
            invalid,
            axis,
        }
    }

    pub fn normalize_record(&self, raw: &RawRecord) -> Result<Record, ParseError> {
        let year = required(&raw.year, &self.mapping.year)?;
        let year = parse_year(year)?;
        let full_date = match (&raw.date, &self.mapping.date) {
            (DateSource::Full(value), DateColumns::Single { column }) => {
                parse_full_date(required(value, column)?, Some(year))?
            }
            (
                DateSource::Parts {
                    year: y,
                    month: m,
                    day: d,
                },
                DateColumns::Split { year, month, day },
            ) => parse_date_parts(required(y, year)?, required(m, month)?, required(d, day)?)?,
            // Row extracted under a different mapping: the mapped cells are absent.
            (DateSource::Full(_), DateColumns::Split { month, .. }) => {
                return Err(ParseError::missing(month.as_str()));
            }
            (DateSource::Parts { .. }, DateColumns::Single { column }) => {
                return Err(ParseError::missing(column.as_str()));
            }
        };
        Ok(Record {
            row: raw.row,
            year,
            full_date,
            reference_name: raw.reference_name.clone(),
            extra: raw.extra.clone(),
        })
    }

    /// Pulls mapped cells out of `table`. Unmapped columns land in `extra`.
    ///
    /// A mapped column absent from the header reads as empty, which
    /// normalization reports per row as a missing field.
    pub fn extract(&self, table: &CsvTable) -> Vec<RawRecord> {
        let lookup = |name: &str| {
            let index = table.column_index(name);
            if index.is_none() {
                warn!(column = name, "mapped column not found in table header");
            }
            index
        };
        let year_idx = lookup(&self.mapping.year);
        let reference_idx = lookup(&self.mapping.reference);
        let date_idx = match &self.mapping.date {
            DateColumns::Single { column } => DateIndex::Single(lookup(column)),
            DateColumns::Split { year, month, day } => {
                DateIndex::Split(lookup(year), lookup(month), lookup(day))
            }
        };

        let mut mapped: BTreeSet<usize> = [year_idx, reference_idx].into_iter().flatten().collect();
        match date_idx {
            DateIndex::Single(idx) => mapped.extend(idx),
            DateIndex::Split(y, m, d) => mapped.extend([y, m, d].into_iter().flatten()),
        }

        table
            .rows
            .iter()
            .enumerate()
            .map(|(offset, row)| {
                let cell = |idx: Option<usize>| {
                    idx.and_then(|i| row.get(i))
                        .cloned()
                        .unwrap_or_default()
                };
                let date = match date_idx {
                    DateIndex::Single(idx) => DateSource::Full(cell(idx)),
                    DateIndex::Split(y, m, d) => DateSource::Parts {
                        year: cell(y),
                        month: cell(m),
                        day: cell(d),
                    },
                };
                let extra: BTreeMap<String, String> = table
                    .headers
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| !mapped.contains(idx))
                    .map(|(idx, header)| (header.clone(), cell(Some(idx))))
                    .collect();
                RawRecord {
                    row: offset + 1,
                    year: cell(year_idx),
                    date,
                    reference_name: cell(reference_idx),
                    extra,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum DateIndex {
    Single(Option<usize>),
    Split(Option<usize>, Option<usize>, Option<usize>),
}

fn required<'a>(value: &'a str, column: &str) -> Result<&'a str, ParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ParseError::missing(column))
    } else {
        Ok(trimmed)
    }
}
