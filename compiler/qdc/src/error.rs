//! CLI error type.

use std::io;

/// Anything that stops a command before or while it writes its report.
///
/// Lexical errors in the query are not `CliError`s: they are reported as
/// diagnostics and only change the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid color mode '{0}' (expected auto, always or never)")]
    InvalidColor(String),
    #[error("missing input path (use '-' to read stdin)")]
    MissingInput,
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("cannot find file '{0}'")]
    NotFound(String),
    #[error("permission denied reading '{0}'")]
    PermissionDenied(String),
    #[error("'{0}' contains invalid UTF-8 data")]
    InvalidUtf8(String),
    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("unknown error code '{0}' (run 'qd explain' for the list)")]
    UnknownErrorCode(String),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Classify a failed read of `path`.
    pub fn from_read(path: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CliError::NotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied(path.to_string()),
            io::ErrorKind::InvalidData => CliError::InvalidUtf8(path.to_string()),
            _ => CliError::Read {
                path: path.to_string(),
                source: err,
            },
        }
    }
}
