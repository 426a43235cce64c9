//! Rendering tests for the table and JSON presenters.

use bloom_cli::render::{JsonRenderer, RenderView, TableRenderer};
use bloom_core::{ChartContext, ChartData, ChartRenderer, DateNormalizer, TrendEstimator};
use bloom_ingest::CsvTable;
use insta::assert_snapshot;

fn table(rows: &[(&str, &str, &str)]) -> CsvTable {
    CsvTable {
        headers: vec![
            "Year".to_string(),
            "FullDate".to_string(),
            "Reference Name".to_string(),
        ],
        rows: rows
            .iter()
            .map(|(y, d, r)| vec![y.to_string(), d.to_string(), r.to_string()])
            .collect(),
    }
}

fn render_json(chart: &ChartData, view: RenderView) -> String {
    let mut renderer = JsonRenderer::new(Vec::new(), view);
    renderer.draw(chart).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

fn render_table(chart: &ChartData, view: RenderView) -> String {
    let mut renderer = TableRenderer::new(Vec::new(), view);
    renderer.draw(chart).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

#[test]
fn json_chart_lists_records_and_invalid_rows() {
    let chart = ChartContext::new(DateNormalizer::default())
        .recompute(&table(&[("2019", "2019-04-01", "Kyoto"), ("2021", "not-a-date", "")]));
    assert_snapshot!(render_json(&chart, RenderView::Chart), @r#"
    {
      "axis": [
        "2019-04-01"
      ],
      "year_extent": [
        2019,
        2019
      ],
      "records": [
        {
          "row": 1,
          "year": 2019,
          "date": "2019-04-01",
          "reference": "Kyoto",
          "axis_index": 0
        }
      ],
      "invalid": [
        {
          "row": 2,
          "error": "malformed date `not-a-date`"
        }
      ],
      "trend": null
    }
    "#);
}

#[test]
fn json_dates_view_omits_records() {
    let chart = ChartContext::new(DateNormalizer::default()).recompute(&table(&[
        ("2020", "2020-03-25", "a"),
        ("2019", "4/1/2019", "b"),
        ("2020", "2020-03-25", "c"),
    ]));
    assert_snapshot!(render_json(&chart, RenderView::Dates), @r#"
    {
      "axis": [
        "2019-04-01",
        "2020-03-25"
      ],
      "invalid": []
    }
    "#);
}

#[test]
fn json_trend_carries_predicted_dates() {
    let chart = ChartContext::new(DateNormalizer::default())
        .with_trend(TrendEstimator::default())
        .recompute(&table(&[
            ("2019", "2019-04-01", "a"),
            ("2020", "2020-03-25", "b"),
            ("2021", "2021-03-26", "c"),
        ]));
    let value: serde_json::Value =
        serde_json::from_str(&render_json(&chart, RenderView::Chart)).unwrap();
    let dates: Vec<&str> = value["trend"]
        .as_array()
        .unwrap()
        .iter()
        .map(|point| point["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2019-04-01", "2020-03-25", "2021-03-26"]);
    assert!(value.get("trend_error").is_none());
}

#[test]
fn table_chart_reports_skipped_trend() {
    let chart = ChartContext::new(DateNormalizer::default())
        .with_trend(TrendEstimator::default())
        .recompute(&table(&[("2019", "2019-04-01", "Kyoto"), ("2021", "2021-02-30", "")]));
    let output = render_table(&chart, RenderView::Chart);
    assert!(output.starts_with("Records: 1  Invalid: 1  Axis dates: 1\n"));
    assert!(output.contains("Years: 2019-2019"));
    assert!(output.contains("Kyoto"));
    assert!(output.contains("Trend: skipped (degree 2 fit needs at least 3 distinct years, got 1)"));
    assert!(output.contains("2021-02-30 is not a valid calendar date"));
}

#[test]
fn table_dates_view_counts_records_per_date() {
    let chart = ChartContext::new(DateNormalizer::default()).recompute(&table(&[
        ("2020", "2020-03-25", "a"),
        ("2020", "2020-03-25", "b"),
        ("2019", "2019-04-01", "c"),
    ]));
    let output = render_table(&chart, RenderView::Dates);
    assert!(output.contains("2019-04-01"));
    assert!(output.contains("2020-03-25"));
    assert!(!output.contains("Reference"));
    assert!(!output.contains("Trend"));
}

#[test]
fn empty_axis_is_reported() {
    let chart = ChartContext::new(DateNormalizer::default()).recompute(&table(&[]));
    let output = render_table(&chart, RenderView::Dates);
    assert_eq!(output, "Records: 0  Invalid: 0  Axis dates: 0\nDate axis is empty\n");
}
