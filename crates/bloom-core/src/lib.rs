//! Bloom date normalization and trend fitting.
//!
//! - **datetime**: calendar date parsing for single-cell and split dates
//! - **normalizer**: row normalization and the sorted, deduplicated date axis
//! - **trend**: least-squares polynomial trend over (year, date)
//! - **chart**: recompute-and-redraw context handed to a renderer

pub mod chart;
pub mod datetime;
pub mod normalizer;
pub mod trend;

pub use chart::{ChartContext, ChartData, ChartRenderer, RenderError};
pub use datetime::{
    calendar_date, parse_date_parts, parse_day, parse_full_date, parse_month, parse_year,
};
pub use normalizer::{DateNormalizer, Normalized};
pub use trend::{DEFAULT_TREND_DEGREE, TrendEstimator, TrendFit};
