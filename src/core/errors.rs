//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for declmap operations
///
/// Extraction itself never fails: malformed modules and unsupported type
/// forms surface as [`ExtractionWarning`](crate::analyzers::typescript::ExtractionWarning)s.
/// This type covers the edges around the engine (files, config, output).
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Parser setup errors
    #[error("Parse error in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a parse error for a file
    pub fn parse(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_system_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::file_system("Failed to read a.ts", "a.ts", io);

        assert_eq!(err.to_string(), "File system error: Failed to read a.ts");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = Error::parse("a.ts", "language rejected");
        assert_eq!(err.to_string(), "Parse error in a.ts: language rejected");
    }
}
