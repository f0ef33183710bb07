//! Error types for registry operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    /// A required configuration field is missing. The message is shown verbatim.
    #[error("{0}")]
    Config(String),

    #[error("unsupported package type: {requested}. Supported types: {supported}")]
    UnsupportedPackageType { requested: String, supported: String },

    #[error("unsupported command: {0}. Supported commands: push, pull, get, delete")]
    UnsupportedCommand(String),

    #[error("failed to access source path '{}': {source}", path.display())]
    SourceAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "directories are not supported, only single files can be pushed. Source '{}' is a directory",
        .0.display()
    )]
    DirectoryNotSupported(PathBuf),

    #[error("no files found in directory '{}'", .0.display())]
    NoFilesFound(PathBuf),

    /// The registry tool takes paths as UTF-8 arguments
    #[error("path '{}' is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("failed to create auth file: {0}")]
    AuthFile(String),

    #[error("failed to {operation}: {reason}")]
    CommandFailed { operation: String, reason: String },

    #[error("operation cancelled: {0}")]
    Cancelled(String),

    #[error("{label} {operation} is not yet implemented")]
    NotImplemented {
        label: &'static str,
        operation: &'static str,
    },
}

impl PluginError {
    /// Configuration and usage errors, raised before any filesystem or process activity
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            PluginError::Config(_)
                | PluginError::UnsupportedPackageType { .. }
                | PluginError::UnsupportedCommand(_)
        )
    }
}

pub type PluginResult<T> = Result<T, PluginError>;
