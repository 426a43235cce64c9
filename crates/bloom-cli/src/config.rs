//! Resolves column mapping and ingest settings from CLI input.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bloom_ingest::IngestOptions;
use bloom_model::{ColumnMapping, DateColumns};

/// Column names given directly on the command line.
///
/// These override a mapping file, which overrides the defaults.
#[derive(Debug, Clone, Default)]
pub struct MappingOverrides {
    pub year: Option<String>,
    pub date: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub reference: Option<String>,
}

pub fn load_mapping_file(path: &Path) -> Result<ColumnMapping> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read mapping: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parse mapping: {}", path.display()))
}

pub fn resolve_mapping(file: Option<&Path>, overrides: &MappingOverrides) -> Result<ColumnMapping> {
    let mut mapping = match file {
        Some(path) => load_mapping_file(path)?,
        None => ColumnMapping::default(),
    };
    apply_overrides(&mut mapping, overrides)?;
    mapping.validate()?;
    Ok(mapping)
}

/// Layers command-line column names over `mapping`.
pub fn apply_overrides(mapping: &mut ColumnMapping, overrides: &MappingOverrides) -> Result<()> {
    if let Some(year) = &overrides.year {
        // A split date that shared the record year column follows the override.
        if let DateColumns::Split { year: date_year, .. } = &mut mapping.date
            && *date_year == mapping.year
        {
            date_year.clone_from(year);
        }
        mapping.year = year.clone();
    }
    match (&overrides.month, &overrides.day) {
        (Some(month), Some(day)) => {
            if overrides.date.is_some() {
                bail!("--date-column cannot be combined with --month-column/--day-column");
            }
            mapping.date = DateColumns::Split {
                year: mapping.year.clone(),
                month: month.clone(),
                day: day.clone(),
            };
        }
        (None, None) => {
            if let Some(column) = &overrides.date {
                mapping.date = DateColumns::Single {
                    column: column.clone(),
                };
            }
        }
        _ => bail!("--month-column and --day-column must be given together"),
    }
    if let Some(reference) = &overrides.reference {
        mapping.reference = reference.clone();
    }
    Ok(())
}

pub fn ingest_options(delimiter: char) -> Result<IngestOptions> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {delimiter:?}");
    }
    Ok(IngestOptions {
        delimiter: delimiter as u8,
    })
}
