use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Distinct dates in ascending chronological order.
///
/// Construction always deduplicates and sorts, so a `DateAxis` can never hold
/// repeated or out-of-order entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateAxis {
    dates: Vec<NaiveDate>,
}

impl DateAxis {
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();
        Self {
            dates: unique.into_iter().collect(),
        }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Index of `date` on the axis, used for point-scale placement.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Axis tick labels as `YYYY-MM-DD`.
    pub fn labels(&self) -> Vec<String> {
        self.dates
            .iter()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn position_matches_sorted_order() {
        let axis = DateAxis::from_dates([date(2020, 3, 25), date(2019, 4, 1), date(2021, 3, 28)]);
        assert_eq!(axis.position(date(2019, 4, 1)), Some(0));
        assert_eq!(axis.position(date(2021, 3, 28)), Some(2));
        assert_eq!(axis.position(date(2018, 1, 1)), None);
    }

    #[test]
    fn empty_axis() {
        let axis = DateAxis::from_dates(Vec::new());
        assert!(axis.is_empty());
        assert_eq!(axis.first(), None);
        assert!(axis.labels().is_empty());
    }
}
