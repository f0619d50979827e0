//! Dataset loading errors

use std::path::Path;

use thiserror::Error;

/// Failure to produce a dataset from a loader
#[derive(Error, Debug)]
pub enum LoadError {
    /// Dataset file does not exist
    #[error("Dataset file not found: {path}")]
    NotFound { path: String },

    /// IO error while reading the dataset
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Dataset content could not be parsed
    #[error("Failed to parse dataset: {0}")]
    Parse(String),
}

impl LoadError {
    pub fn from_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let err = LoadError::from_io(
            "/tmp/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.to_string(), "Dataset file not found: /tmp/missing.json");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = LoadError::from_io(
            "/tmp/locked.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.to_string(), "IO error reading /tmp/locked.json: denied");
    }

    #[test]
    fn test_parse_error_display() {
        let err = LoadError::Parse("expected array".into());
        assert_eq!(err.to_string(), "Failed to parse dataset: expected array");
    }
}
