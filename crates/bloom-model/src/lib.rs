pub mod axis;
pub mod error;
pub mod mapping;
pub mod record;
pub mod trend;

pub use axis::DateAxis;
pub use error::{MappingError, ParseError, TrendError};
pub use mapping::{
    ColumnMapping, DEFAULT_DATE_COLUMN, DEFAULT_REFERENCE_COLUMN, DEFAULT_YEAR_COLUMN,
    DateColumns,
};
pub use record::{DateSource, InvalidRecord, RawRecord, Record};
pub use trend::{TrendPoint, date_to_millis, millis_to_datetime};
