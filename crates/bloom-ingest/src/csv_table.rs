use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DataLoadError;

/// Header row plus data rows, every row padded to the header width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Finds a column by exact header match, then case-insensitively.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|header| *header == wanted)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(&wanted))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable, DataLoadError> {
    read_csv_table_with_options(path, &IngestOptions::default())
}

pub fn read_csv_table_with_options(
    path: &Path,
    options: &IngestOptions,
) -> Result<CsvTable, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_rows(file, options).map_err(|source| DataLoadError::Csv {
        path: Some(path.to_path_buf()),
        source,
    })?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded table"
    );
    Ok(table)
}

/// Reads a table from any reader, e.g. an in-memory buffer.
pub fn read_csv_reader<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<CsvTable, DataLoadError> {
    read_rows(reader, options).map_err(|source| DataLoadError::Csv { path: None, source })
}

fn read_rows<R: Read>(reader: R, options: &IngestOptions) -> Result<CsvTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(width) = headers.as_ref().map(Vec::len) else {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        };
        let row: Vec<String> = (0..width)
            .map(|idx| record.get(idx).map(normalize_cell).unwrap_or_default())
            .collect();
        rows.push(row);
    }
    Ok(CsvTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}
