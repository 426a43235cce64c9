pub mod csv_table;
pub mod error;

pub use csv_table::{
    CsvTable, IngestOptions, read_csv_reader, read_csv_table, read_csv_table_with_options,
};
pub use error::DataLoadError;
