use std::path::PathBuf;

use thiserror::Error;

/// Failure to fetch or decode the source table.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse csv{}: {source}", location(.path))]
    Csv {
        path: Option<PathBuf>,
        #[source]
        source: csv::Error,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
