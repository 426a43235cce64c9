//! Recompute-and-redraw entry points for the bloom chart.
//!
//! A [`ChartContext`] carries everything a render needs; nothing is kept
//! between calls. The host (a CLI, a resize handler, a file watcher) calls
//! [`ChartContext::redraw`] whenever data or viewport change, and every call
//! derives the chart data from scratch.

use bloom_ingest::{CsvTable, DataLoadError};
use bloom_model::{DateAxis, InvalidRecord, Record, TrendError, TrendPoint};
use thiserror::Error;
use tracing::{error, info_span, warn};

use crate::normalizer::DateNormalizer;
use crate::trend::TrendEstimator;

/// Presentation layer that turns chart data into output.
pub trait ChartRenderer {
    type Error;

    fn draw(&mut self, chart: &ChartData) -> Result<(), Self::Error>;
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub records: Vec<Record>,
    pub invalid: Vec<InvalidRecord>,
    pub axis: DateAxis,
    /// Year domain of the horizontal axis.
    pub year_extent: Option<(i32, i32)>,
    /// Trend overlay; `None` when disabled or when the fit failed.
    pub trend: Option<Vec<TrendPoint>>,
    pub trend_error: Option<TrendError>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum RenderError<E> {
    #[error("data load failed: {0}")]
    DataLoad(#[source] DataLoadError),
    #[error("renderer failed: {0}")]
    Renderer(#[source] E),
}

#[derive(Debug, Clone, Default)]
pub struct ChartContext {
    normalizer: DateNormalizer,
    trend: Option<TrendEstimator>,
}

impl ChartContext {
    /// Context without a trend overlay.
    pub fn new(normalizer: DateNormalizer) -> Self {
        Self {
            normalizer,
            trend: None,
        }
    }

    #[must_use]
    pub fn with_trend(mut self, estimator: TrendEstimator) -> Self {
        self.trend = Some(estimator);
        self
    }

    pub fn normalizer(&self) -> &DateNormalizer {
        &self.normalizer
    }

    pub fn trend(&self) -> Option<&TrendEstimator> {
        self.trend.as_ref()
    }

    pub fn recompute(&self, table: &CsvTable) -> ChartData {
        let normalized = self.normalizer.normalize_table(table);
        let year_extent = normalized.year_extent();

        let (trend, trend_error) = match &self.trend {
            None => (None, None),
            Some(estimator) => match estimator.estimate(&normalized.records) {
                Ok(points) => (Some(points), None),
                Err(err) => {
                    warn!(error = %err, "trend overlay skipped");
                    (None, Some(err))
                }
            },
        };

        ChartData {
            records: normalized.records,
            invalid: normalized.invalid,
            axis: normalized.axis,
            year_extent,
            trend,
            trend_error,
        }
    }

    /// Recomputes chart data and hands it to `renderer`.
    pub fn redraw<R: ChartRenderer>(
        &self,
        table: &CsvTable,
        renderer: &mut R,
    ) -> Result<ChartData, R::Error> {
        let span = info_span!("redraw", rows = table.rows.len());
        let _guard = span.enter();
        let chart = self.recompute(table);
        renderer.draw(&chart)?;
        Ok(chart)
    }

    /// Data-ready callback. A load failure is logged and nothing is drawn.
    pub fn on_data_ready<R: ChartRenderer>(
        &self,
        loaded: Result<CsvTable, DataLoadError>,
        renderer: &mut R,
    ) -> Result<ChartData, RenderError<R::Error>> {
        let table = match loaded {
            Ok(table) => table,
            Err(err) => {
                error!(error = %err, "failed to load chart data");
                return Err(RenderError::DataLoad(err));
            }
        };
        self.redraw(&table, renderer).map_err(RenderError::Renderer)
    }
}
