//! Errors raised while recovering call-site source text.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the debugger.
#[derive(Debug, Error)]
pub enum ScoopError {
    /// The source text of the call site could not be retrieved, or the
    /// call could not be found in it.
    #[error("no source available for {file}:{line}: {reason}")]
    NoSourceAvailable {
        /// File as reported by the caller location.
        file: String,
        /// 1-based line of the call site.
        line: u32,
        /// Why the source could not be used.
        reason: String,
    },

    /// `configure_output` was called without any option set.
    #[error("configure_output called without any recognized option")]
    InvalidConfiguration,

    /// Reading a source file failed for a reason other than it missing.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that was read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl ScoopError {
    pub(crate) fn no_source(file: &str, line: u32, reason: impl Into<String>) -> Self {
        Self::NoSourceAvailable {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }

    /// Returns `true` for the errors the facade degrades into unlabeled output.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration)
    }
}

/// Result type for debugger operations.
pub type Result<T> = std::result::Result<T, ScoopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = ScoopError::no_source("src/main.rs", 12, "line is past the end of the file");
        assert_eq!(
            err.to_string(),
            "no source available for src/main.rs:12: line is past the end of the file"
        );
        assert!(err.is_recoverable());
        assert!(!ScoopError::InvalidConfiguration.is_recoverable());
    }

    #[test]
    fn io_error_keeps_source() {
        let err = ScoopError::Io {
            path: PathBuf::from("a.rs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read a.rs: denied");
        assert!(std::error::Error::source(&err).is_some());
    }
}
