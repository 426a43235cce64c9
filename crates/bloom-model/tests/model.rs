//! Tests for bloom-model types.

use bloom_model::{
    ColumnMapping, DateAxis, DateColumns, MappingError, TrendPoint, date_to_millis,
    millis_to_datetime,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn axis_deduplicates_and_sorts() {
    let axis = DateAxis::from_dates([date(2020, 3, 25), date(2019, 4, 1), date(2020, 3, 25)]);
    assert_eq!(axis.labels(), vec!["2019-04-01", "2020-03-25"]);
    assert_eq!(axis.len(), 2);
}

#[test]
fn axis_orders_chronologically_not_lexically() {
    let axis = DateAxis::from_dates([date(2019, 12, 1), date(2019, 2, 1), date(2018, 12, 31)]);
    assert_eq!(
        axis.dates(),
        &[date(2018, 12, 31), date(2019, 2, 1), date(2019, 12, 1)]
    );
}

#[test]
fn axis_serializes_as_date_strings() {
    let axis = DateAxis::from_dates([date(2020, 3, 25), date(2019, 4, 1)]);
    let json = serde_json::to_string(&axis).expect("serialize axis");
    assert_eq!(json, r#"["2019-04-01","2020-03-25"]"#);
}

#[test]
fn mapping_reads_split_columns_from_json() {
    let json = r#"{
        "year": "Yr",
        "date": { "kind": "split", "year": "Yr", "month": "Mon", "day": "Day" },
        "reference": "Source"
    }"#;
    let mapping: ColumnMapping = serde_json::from_str(json).expect("parse mapping");
    assert_eq!(
        mapping.date,
        DateColumns::Split {
            year: "Yr".to_string(),
            month: "Mon".to_string(),
            day: "Day".to_string(),
        }
    );
    assert_eq!(mapping.reference, "Source");
    assert!(mapping.validate().is_ok());
}

#[test]
fn mapping_fills_missing_fields_with_defaults() {
    let mapping: ColumnMapping =
        serde_json::from_str(r#"{ "reference": "Ref" }"#).expect("parse mapping");
    assert_eq!(mapping.year, "Year");
    assert_eq!(mapping.date, DateColumns::default());
    assert_eq!(mapping.reference, "Ref");
}

#[test]
fn mapping_rejects_blank_columns() {
    let mapping = ColumnMapping {
        date: DateColumns::Split {
            year: "Year".to_string(),
            month: " ".to_string(),
            day: "Day".to_string(),
        },
        ..ColumnMapping::default()
    };
    assert_eq!(
        mapping.validate(),
        Err(MappingError::EmptyColumn("date.month"))
    );
}

#[test]
fn millis_conversion_is_utc_midnight() {
    assert_eq!(date_to_millis(date(1970, 1, 2)), 86_400_000.0);
    let back = millis_to_datetime(86_400_000.0).expect("in range");
    assert_eq!(back.date(), date(1970, 1, 2));
    assert!(millis_to_datetime(f64::NAN).is_none());
}

#[test]
fn trend_point_converts_back_to_date() {
    let point = TrendPoint {
        x: 2020,
        y: date_to_millis(date(2020, 3, 25)) + 3_600_000.0,
    };
    assert_eq!(point.predicted_date(), Some(date(2020, 3, 25)));
}
