//! CLI-specific error types

use artifact_plugin::PluginError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Plugin(#[from] PluginError),
}

impl CliError {
    /// Process exit status: 2 for configuration and usage errors, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Plugin(e) if e.is_usage_error() => 2,
            CliError::Plugin(_) => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
