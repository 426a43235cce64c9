//! Result of one render run and the process exit code it maps to.

use bloom_core::ChartData;

/// Row counts of a finished render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub records: usize,
    pub invalid: usize,
}

impl RunOutcome {
    pub fn from_chart(chart: &ChartData) -> Self {
        Self {
            records: chart.records.len(),
            invalid: chart.invalid.len(),
        }
    }

    /// Every row was rejected, so nothing could be placed on the axis.
    pub fn all_invalid(&self) -> bool {
        self.records == 0 && self.invalid > 0
    }
}

/// 0 on success; 1 on load or configuration errors, or when no row is usable.
pub fn exit_code(result: &anyhow::Result<RunOutcome>) -> i32 {
    match result {
        Ok(outcome) if outcome.all_invalid() => 1,
        Ok(_) => 0,
        Err(_) => 1,
    }
}
