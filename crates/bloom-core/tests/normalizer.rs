//! Tests for record normalization and date axis construction.

use bloom_core::DateNormalizer;
use bloom_ingest::CsvTable;
use bloom_model::{ColumnMapping, DateColumns, DateSource, ParseError, RawRecord};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn table(headers: &[&str], rows: &[&[&str]]) -> CsvTable {
    CsvTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    }
}

fn raw(row: usize, year: &str, full_date: &str) -> RawRecord {
    RawRecord {
        row,
        year: year.to_string(),
        date: DateSource::Full(full_date.to_string()),
        reference_name: format!("ref-{row}"),
        extra: Default::default(),
    }
}

#[test]
fn deduplicates_and_sorts_axis() {
    let normalizer = DateNormalizer::default();
    let result = normalizer.normalize(&[
        raw(1, "2020", "2020-03-25"),
        raw(2, "2019", "2019-04-01"),
        raw(3, "2020", "2020-03-25"),
    ]);
    assert_eq!(result.axis.labels(), vec!["2019-04-01", "2020-03-25"]);
    assert_eq!(result.records.len(), 3);
    assert!(result.invalid.is_empty());
}

#[test]
fn malformed_date_is_flagged_not_dropped() {
    let normalizer = DateNormalizer::default();
    let result = normalizer.normalize(&[
        raw(1, "2020", "2020-03-25"),
        raw(2, "2021", "not-a-date"),
        raw(3, "2019", "2019-04-01"),
    ]);
    assert_eq!(result.axis.labels(), vec!["2019-04-01", "2020-03-25"]);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.invalid.len(), 1);
    assert_eq!(result.invalid[0].row(), 2);
    assert_eq!(
        result.invalid[0].error,
        ParseError::MalformedDate {
            value: "not-a-date".to_string()
        }
    );
    assert_eq!(result.total(), 3);
}

#[test]
fn sorts_by_calendar_not_text() {
    let normalizer = DateNormalizer::default();
    let result = normalizer.normalize(&[
        raw(1, "2019", "4/1/2019"),
        raw(2, "2019", "2019-03-30"),
        raw(3, "2018", "Apr 5, 2018"),
    ]);
    assert_eq!(
        result.axis.dates(),
        &[date(2018, 4, 5), date(2019, 3, 30), date(2019, 4, 1)]
    );
}

#[test]
fn every_row_invalid_gives_empty_axis() {
    let normalizer = DateNormalizer::default();
    let result = normalizer.normalize(&[raw(1, "2020", "soon"), raw(2, "20x0", "2020-03-25")]);
    assert!(result.axis.is_empty());
    assert!(result.all_invalid());
    assert!(matches!(
        result.invalid[1].error,
        ParseError::MalformedYear { .. }
    ));
}

#[test]
fn reads_default_columns_from_table() {
    let table = table(
        &["Year", "FullDate", "Reference Name", "Site"],
        &[
            &["2020", "2020-03-25", "Kyoto diary", "Arashiyama"],
            &["2019", "2019-04-01", "Kyoto diary", "Gion"],
        ],
    );
    let result = DateNormalizer::default().normalize_table(&table);
    assert_eq!(result.records.len(), 2);
    let first = &result.records[0];
    assert_eq!(first.row, 1);
    assert_eq!(first.year, 2020);
    assert_eq!(first.full_date, date(2020, 3, 25));
    assert_eq!(first.reference_name, "Kyoto diary");
    assert_eq!(first.extra.get("Site").map(String::as_str), Some("Arashiyama"));
    assert_eq!(first.extra.len(), 1);
    assert_eq!(result.axis_position(first), Some(1));
    assert_eq!(result.year_extent(), Some((2019, 2020)));
}

#[test]
fn reads_split_date_columns() {
    let mapping = ColumnMapping {
        year: "AD".to_string(),
        date: DateColumns::Split {
            year: "AD".to_string(),
            month: "Month".to_string(),
            day: "Day".to_string(),
        },
        reference: "Source".to_string(),
    };
    let table = table(
        &["AD", "Month", "Day", "Source"],
        &[&["812", "4", "1", "Nihon Kōki"], &["1409", "Apr", "9", "Kanmon Nikki"]],
    );
    let result = DateNormalizer::new(mapping).normalize_table(&table);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].full_date, date(1409, 4, 9));
    assert_eq!(result.invalid.len(), 1);
    assert_eq!(
        result.invalid[0].error,
        ParseError::MalformedYear {
            value: "812".to_string()
        }
    );
}

#[test]
fn row_shape_must_match_the_mapping() {
    let split = DateNormalizer::new(ColumnMapping {
        date: DateColumns::Split {
            year: "Year".to_string(),
            month: "M".to_string(),
            day: "D".to_string(),
        },
        ..ColumnMapping::default()
    });
    assert_eq!(
        split.normalize_record(&raw(1, "2020", "2020-03-25")),
        Err(ParseError::missing("M"))
    );

    let parts = RawRecord {
        date: DateSource::Parts {
            year: "2020".to_string(),
            month: "3".to_string(),
            day: "25".to_string(),
        },
        ..raw(2, "2020", "")
    };
    assert_eq!(
        DateNormalizer::default().normalize_record(&parts),
        Err(ParseError::missing("FullDate"))
    );
}

#[test]
fn missing_column_reports_missing_field() {
    let table = table(&["Year", "Reference Name"], &[&["2020", "Kyoto diary"]]);
    let result = DateNormalizer::default().normalize_table(&table);
    assert!(result.records.is_empty());
    assert_eq!(result.invalid[0].error, ParseError::missing("FullDate"));
}

#[test]
fn empty_cell_reports_missing_field() {
    let table = table(
        &["Year", "FullDate", "Reference Name"],
        &[&["", "2020-03-25", "x"], &["2021", " ", "y"]],
    );
    let result = DateNormalizer::default().normalize_table(&table);
    assert_eq!(result.invalid[0].error, ParseError::missing("Year"));
    assert_eq!(result.invalid[1].error, ParseError::missing("FullDate"));
}

#[test]
fn header_lookup_is_case_insensitive() {
    let table = table(
        &["year", "fulldate", "reference name"],
        &[&["2020", "2020-03-25", "Kyoto diary"]],
    );
    let result = DateNormalizer::default().normalize_table(&table);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].reference_name, "Kyoto diary");
    assert!(result.records[0].extra.is_empty());
}

#[test]
fn normalization_is_idempotent() {
    let table = table(
        &["Year", "FullDate", "Reference Name"],
        &[
            &["2021", "2021-03-26", "a"],
            &["2020", "bad", "b"],
            &["2019", "2019-04-01", "c"],
        ],
    );
    let normalizer = DateNormalizer::default();
    assert_eq!(
        normalizer.normalize_table(&table),
        normalizer.normalize_table(&table)
    );
}
