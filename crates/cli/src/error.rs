use std::path::PathBuf;

/// Turnstile error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be parsed into a Python syntax tree
    #[error("syntax error: {path}: file does not parse")]
    Parse { path: PathBuf },

    /// Dependency manifest missing or malformed
    #[error("manifest error: {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Git repository access failed
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Writing to the output stream failed
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Wrap an io::Error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type using turnstile Error
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes per the pre-commit contract: each hook answers with a single
/// pass/fail bit and the framework aggregates across hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// No violations found
    Clean = 0,
    /// Violations found, or a parse/configuration error
    Fail = 1,
}

impl ExitCode {
    /// Combine per-file statuses: any failure fails the invocation.
    pub fn and(self, other: ExitCode) -> ExitCode {
        if self == ExitCode::Fail || other == ExitCode::Fail {
            ExitCode::Fail
        } else {
            ExitCode::Clean
        }
    }

    /// Status for a batch of violations.
    pub fn from_violations(count: usize) -> ExitCode {
        if count == 0 {
            ExitCode::Clean
        } else {
            ExitCode::Fail
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
