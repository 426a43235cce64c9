//! Terminal and JSON renderers for chart data.

use std::collections::BTreeMap;
use std::io::{self, Write};

use bloom_core::{ChartData, ChartRenderer};
use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

/// Which parts of the chart data a renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderView {
    /// Records, trend overlay and invalid rows.
    Chart,
    /// Date axis and invalid rows only.
    Dates,
}

pub struct TableRenderer<W: Write> {
    out: W,
    view: RenderView,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W, view: RenderView) -> Self {
        Self { out, view }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_summary(&mut self, chart: &ChartData) -> io::Result<()> {
        writeln!(
            self.out,
            "Records: {}  Invalid: {}  Axis dates: {}",
            chart.records.len(),
            chart.invalid.len(),
            chart.axis.len()
        )?;
        if let Some((min, max)) = chart.year_extent {
            writeln!(self.out, "Years: {min}-{max}")?;
        }
        Ok(())
    }

    fn write_records(&mut self, chart: &ChartData) -> io::Result<()> {
        if chart.records.is_empty() {
            return Ok(());
        }
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Row"),
            header_cell("Year"),
            header_cell("Date"),
            header_cell("Reference"),
            header_cell("Axis"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 4, CellAlignment::Right);
        for record in &chart.records {
            let reference = if record.reference_name.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(&record.reference_name)
            };
            table.add_row(vec![
                dim_cell(record.row),
                Cell::new(record.year),
                Cell::new(record.full_date.format("%Y-%m-%d")),
                reference,
                optional_cell(chart.axis.position(record.full_date)),
            ]);
        }
        writeln!(self.out, "{table}")
    }

    fn write_axis(&mut self, chart: &ChartData) -> io::Result<()> {
        if chart.axis.is_empty() {
            return writeln!(self.out, "Date axis is empty");
        }
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in &chart.records {
            *counts.entry(record.full_date).or_default() += 1;
        }
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Index"),
            header_cell("Date"),
            header_cell("Records"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Right);
        for (index, date) in chart.axis.dates().iter().enumerate() {
            table.add_row(vec![
                dim_cell(index),
                Cell::new(date.format("%Y-%m-%d")),
                Cell::new(counts.get(date).copied().unwrap_or(0)),
            ]);
        }
        writeln!(self.out, "{table}")
    }

    fn write_trend(&mut self, chart: &ChartData) -> io::Result<()> {
        if let Some(error) = &chart.trend_error {
            return writeln!(self.out, "Trend: skipped ({error})");
        }
        let Some(points) = &chart.trend else {
            return Ok(());
        };
        let mut table = Table::new();
        table.set_header(vec![header_cell("Year"), header_cell("Trend date")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for point in points {
            let predicted = match point.predicted_date() {
                Some(date) => Cell::new(date.format("%Y-%m-%d")).fg(Color::Green),
                None => dim_cell("-"),
            };
            table.add_row(vec![Cell::new(point.x), predicted]);
        }
        writeln!(self.out, "{table}")
    }

    fn write_invalid(&mut self, chart: &ChartData) -> io::Result<()> {
        if chart.invalid.is_empty() {
            return Ok(());
        }
        let mut table = Table::new();
        table.set_header(vec![header_cell("Row"), header_cell("Problem")]);
        apply_table_style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for invalid in &chart.invalid {
            table.add_row(vec![
                Cell::new(invalid.row()),
                Cell::new(&invalid.error).fg(Color::Yellow),
            ]);
        }
        writeln!(self.out, "{table}")
    }
}

impl<W: Write> ChartRenderer for TableRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, chart: &ChartData) -> Result<(), Self::Error> {
        self.write_summary(chart)?;
        match self.view {
            RenderView::Chart => {
                self.write_records(chart)?;
                self.write_trend(chart)?;
            }
            RenderView::Dates => self.write_axis(chart)?,
        }
        self.write_invalid(chart)?;
        self.out.flush()
    }
}

pub struct JsonRenderer<W: Write> {
    out: W,
    view: RenderView,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, view: RenderView) -> Self {
        Self { out, view }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for JsonRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, chart: &ChartData) -> Result<(), Self::Error> {
        let payload = ChartPayload::from_chart(chart, self.view);
        serde_json::to_writer_pretty(&mut self.out, &payload)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[derive(Serialize)]
struct ChartPayload<'a> {
    axis: &'a [NaiveDate],
    #[serde(skip_serializing_if = "Option::is_none")]
    year_extent: Option<[i32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<Vec<RecordPayload<'a>>>,
    invalid: Vec<InvalidPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend: Option<Option<Vec<TrendPayload>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend_error: Option<String>,
}

#[derive(Serialize)]
struct RecordPayload<'a> {
    row: usize,
    year: i32,
    date: NaiveDate,
    reference: &'a str,
    axis_index: Option<usize>,
    #[serde(skip_serializing_if = "no_extra_columns")]
    extra: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct InvalidPayload {
    row: usize,
    error: String,
}

#[derive(Serialize)]
struct TrendPayload {
    year: i32,
    millis: f64,
    date: Option<NaiveDate>,
}

impl<'a> ChartPayload<'a> {
    fn from_chart(chart: &'a ChartData, view: RenderView) -> Self {
        let invalid = chart
            .invalid
            .iter()
            .map(|invalid| InvalidPayload {
                row: invalid.row(),
                error: invalid.error.to_string(),
            })
            .collect();
        let axis = chart.axis.dates();
        if view == RenderView::Dates {
            return Self {
                axis,
                year_extent: None,
                records: None,
                invalid,
                trend: None,
                trend_error: None,
            };
        }
        let records = chart
            .records
            .iter()
            .map(|record| RecordPayload {
                row: record.row,
                year: record.year,
                date: record.full_date,
                reference: &record.reference_name,
                axis_index: chart.axis.position(record.full_date),
                extra: &record.extra,
            })
            .collect();
        let trend = chart.trend.as_ref().map(|points| {
            points
                .iter()
                .map(|point| TrendPayload {
                    year: point.x,
                    millis: point.y,
                    date: point.predicted_date(),
                })
                .collect()
        });
        Self {
            axis,
            year_extent: chart.year_extent.map(|(min, max)| [min, max]),
            records: Some(records),
            invalid,
            trend: Some(trend),
            trend_error: chart.trend_error.as_ref().map(ToString::to_string),
        }
    }
}

fn no_extra_columns(extra: &&BTreeMap<String, String>) -> bool {
    extra.is_empty()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn optional_cell(value: Option<usize>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}
