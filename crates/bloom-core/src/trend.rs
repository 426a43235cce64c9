//! Least-squares polynomial trend over (year, bloom date).
//!
//! Dates are fitted as milliseconds since the Unix epoch. Years are centered
//! and scaled to `[-1, 1]` and values centered on their mean before the normal
//! equations are formed, which keeps the system well conditioned for year
//! values in the thousands.

use std::collections::BTreeSet;

use bloom_model::{Record, TrendError, TrendPoint, date_to_millis};
use chrono::NaiveDate;
use tracing::debug;

pub const DEFAULT_TREND_DEGREE: usize = 2;

/// Relative pivot threshold below which the system is treated as singular.
const PIVOT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendEstimator {
    degree: usize,
}

impl Default for TrendEstimator {
    fn default() -> Self {
        Self {
            degree: DEFAULT_TREND_DEGREE,
        }
    }
}

impl TrendEstimator {
    /// Rejects degree 0 and degrees whose normal equations cannot be sized.
    pub fn new(degree: usize) -> Result<Self, TrendError> {
        if degree == 0 || system_size(degree).is_none() {
            return Err(TrendError::InvalidDegree(degree));
        }
        Ok(Self { degree })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Fits the curve through valid records and predicts one point per year.
    pub fn estimate(&self, records: &[Record]) -> Result<Vec<TrendPoint>, TrendError> {
        let points: Vec<(i32, NaiveDate)> =
            records.iter().map(|r| (r.year, r.full_date)).collect();
        Ok(self.fit(&points)?.points())
    }

    pub fn fit(&self, points: &[(i32, NaiveDate)]) -> Result<TrendFit, TrendError> {
        let values: Vec<(i32, f64)> = points
            .iter()
            .map(|&(year, date)| (year, date_to_millis(date)))
            .collect();
        self.fit_values(&values)
    }

    /// Fits raw numeric values.
    pub fn fit_values(&self, points: &[(i32, f64)]) -> Result<TrendFit, TrendError> {
        let years: BTreeSet<i32> = points.iter().map(|&(year, _)| year).collect();
        let (required, power_terms) =
            system_size(self.degree).ok_or(TrendError::InvalidDegree(self.degree))?;
        if years.len() < required {
            return Err(TrendError::UnderdeterminedFit {
                degree: self.degree,
                required,
                distinct: years.len(),
            });
        }

        let n = points.len() as f64;
        let x_center = points.iter().map(|&(x, _)| f64::from(x)).sum::<f64>() / n;
        let y_center = points.iter().map(|&(_, y)| y).sum::<f64>() / n;
        let x_scale = points
            .iter()
            .map(|&(x, _)| (f64::from(x) - x_center).abs())
            .fold(0.0_f64, f64::max);

        // Power sums of t for the Gram matrix, and moments of the centered values.
        let mut power_sums = vec![0.0_f64; power_terms];
        let mut rhs = vec![0.0_f64; required];
        for &(x, y) in points {
            let t = (f64::from(x) - x_center) / x_scale;
            let z = y - y_center;
            let mut power = 1.0;
            for (k, sum) in power_sums.iter_mut().enumerate() {
                *sum += power;
                if k < required {
                    rhs[k] += z * power;
                }
                power *= t;
            }
        }
        let matrix: Vec<Vec<f64>> = (0..required)
            .map(|row| power_sums[row..row + required].to_vec())
            .collect();

        let coefficients = solve_linear_system(matrix, rhs).ok_or(TrendError::SingularSystem)?;
        debug!(
            degree = self.degree,
            points = points.len(),
            years = years.len(),
            "fitted trend polynomial"
        );
        Ok(TrendFit {
            x_center,
            x_scale,
            y_center,
            coefficients,
            years: years.into_iter().collect(),
        })
    }
}

/// A fitted polynomial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    x_center: f64,
    x_scale: f64,
    y_center: f64,
    coefficients: Vec<f64>,
    years: Vec<i32>,
}

impl TrendFit {
    /// Coefficients in ascending power of the normalized year
    /// `t = (year - center) / scale`, relative to the mean value.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Distinct fitted years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Predicted value for `year`, in milliseconds since the Unix epoch.
    pub fn predict(&self, year: i32) -> f64 {
        let t = (f64::from(year) - self.x_center) / self.x_scale;
        let offset = self
            .coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c);
        self.y_center + offset
    }

    pub fn points(&self) -> Vec<TrendPoint> {
        self.years
            .iter()
            .map(|&year| TrendPoint {
                x: year,
                y: self.predict(year),
            })
            .collect()
    }
}

/// Coefficient count `d + 1` and power-sum count `2d + 1` for degree `d`.
fn system_size(degree: usize) -> Option<(usize, usize)> {
    let required = degree.checked_add(1)?;
    let power_terms = degree.checked_mul(2)?.checked_add(1)?;
    Some((required, power_terms))
}

/// Gaussian elimination with partial pivoting. `None` when singular.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    let scale = a.iter().flatten().fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    let tolerance = scale * PIVOT_EPSILON;

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() <= tolerance {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                let delta = factor * a[col][k];
                a[row][k] -= delta;
            }
            let delta = factor * b[col];
            b[row] -= delta;
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}
