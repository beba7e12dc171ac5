use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors produced by the health tracker.
#[derive(Error, Debug)]
pub enum HealthError {
    /// A field value could not be coerced into its declared type.
    #[error("Invalid {field} {value:?}: {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The data file could not be read, written, or is structurally broken.
    #[error("Storage error for {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for I/O errors that are not tied to the data file
    /// (prompts, terminal).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HealthError {
    pub fn parse(field: &'static str, value: &str, reason: impl ToString) -> Self {
        HealthError::Parse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn storage(
        path: &Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        HealthError::Storage {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// `true` for errors caused by bad input rather than a broken environment.
    pub fn is_parse(&self) -> bool {
        matches!(self, HealthError::Parse { .. })
    }
}

/// Convenience alias used throughout the health crates.
pub type Result<T> = std::result::Result<T, HealthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let err = HealthError::parse("steps", "ten", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "Invalid steps \"ten\": invalid digit found in string"
        );
        assert!(err.is_parse());
    }

    #[test]
    fn test_error_display_storage() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HealthError::storage(Path::new("/data/health.csv"), io_err);
        let msg = err.to_string();
        assert!(msg.contains("Storage error"));
        assert!(msg.contains("/data/health.csv"));
        assert!(msg.contains("denied"));
        assert!(!err.is_parse());
    }

    #[test]
    fn test_error_storage_keeps_source() {
        use std::error::Error as _;

        let io_err = std::io::Error::other("disk full");
        let err = HealthError::storage(Path::new("health.csv"), io_err);
        let source = err.source().expect("storage error carries a source");
        assert_eq!(source.to_string(), "disk full");
    }

    #[test]
    fn test_error_display_config() {
        let err = HealthError::Config("no home directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: no home directory");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        let err: HealthError = io_err.into();
        assert!(err.to_string().contains("closed"));
    }
}
