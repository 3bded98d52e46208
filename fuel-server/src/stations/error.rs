//! Station catalog error types.

use std::path::PathBuf;

/// Errors that can occur when loading the station price catalog.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// Catalog file could not be read
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON of the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Catalog parsed but held no usable station
    #[error("catalog contains no valid stations")]
    Empty,

    /// Refresh requested on a catalog built in memory
    #[error("catalog has no source file to refresh from")]
    NoSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::Io {
            path: PathBuf::from("data/gas_stations.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read catalog data/gas_stations.json: missing"
        );

        assert_eq!(
            StationError::Empty.to_string(),
            "catalog contains no valid stations"
        );
    }
}
