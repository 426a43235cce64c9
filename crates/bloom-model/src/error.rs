use thiserror::Error;

/// Reason a single row could not be normalized.
///
/// Parse failures are isolated per row; the caller decides whether the row
/// is reported, skipped, or treated as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing value for column `{column}`")]
    MissingField { column: String },
    #[error("malformed year `{value}` (expected a 4-digit year)")]
    MalformedYear { value: String },
    #[error("malformed month `{value}`")]
    MalformedMonth { value: String },
    #[error("malformed day `{value}`")]
    MalformedDay { value: String },
    #[error("malformed date `{value}`")]
    MalformedDate { value: String },
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },
}

impl ParseError {
    pub fn missing(column: impl Into<String>) -> Self {
        Self::MissingField {
            column: column.into(),
        }
    }
}

/// Errors raised while fitting a trend polynomial.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("unsupported polynomial degree {0} (expected 1 or more)")]
    InvalidDegree(usize),
    /// Fewer distinct years than coefficients to solve for.
    #[error(
        "degree {degree} fit needs at least {required} distinct years, got {distinct}"
    )]
    UnderdeterminedFit {
        degree: usize,
        required: usize,
        distinct: usize,
    },
    #[error("normal equations are numerically singular")]
    SingularSystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("column mapping for `{0}` is empty")]
    EmptyColumn(&'static str),
}
