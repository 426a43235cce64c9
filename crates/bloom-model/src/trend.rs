use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch for `date` at midnight UTC.
pub fn date_to_millis(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// Inverse of [`date_to_millis`], rounding to the nearest millisecond.
///
/// Returns `None` for non-finite or out-of-range values.
pub fn millis_to_datetime(millis: f64) -> Option<NaiveDateTime> {
    if !millis.is_finite() {
        return None;
    }
    let rounded = millis.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(rounded as i64).map(|dt| dt.naive_utc())
}

/// One point on the fitted trend curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Year.
    pub x: i32,
    /// Predicted date, in milliseconds since the Unix epoch.
    pub y: f64,
}

impl TrendPoint {
    pub fn predicted(&self) -> Option<NaiveDateTime> {
        millis_to_datetime(self.y)
    }

    /// Predicted calendar day (time of day discarded).
    pub fn predicted_date(&self) -> Option<NaiveDate> {
        self.predicted().map(|dt| dt.date())
    }
}
