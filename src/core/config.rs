//! Operation parameters shared by every package handler

use crate::core::error::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};

/// Version used when a push does not specify one
pub const DEFAULT_VERSION: &str = "v1";

/// Parameters for one registry operation.
///
/// Built once per invocation and only read by handlers. Empty strings are
/// treated the same as unset values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationConfig {
    // Authentication
    pub token: Option<String>,
    pub account: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
    pub api_url: Option<String>,
    pub pkg_url: Option<String>,

    // Registry and artifact details
    pub registry: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub filename: Option<String>,

    // Operation paths
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// Returns the value when present and non-empty
pub fn value(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

/// Returns the value or a configuration error carrying `message`
pub fn require<'a>(field: &'a Option<String>, message: &str) -> PluginResult<&'a str> {
    value(field).ok_or_else(|| PluginError::Config(message.to_string()))
}

impl OperationConfig {
    pub fn registry(&self) -> &str {
        value(&self.registry).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        value(&self.name).unwrap_or_default()
    }

    pub fn token(&self) -> &str {
        value(&self.token).unwrap_or_default()
    }

    pub fn account(&self) -> &str {
        value(&self.account).unwrap_or_default()
    }

    pub fn pkg_url(&self) -> &str {
        value(&self.pkg_url).unwrap_or_default()
    }

    /// Configured version, or [`DEFAULT_VERSION`]
    pub fn version_or_default(&self) -> &str {
        value(&self.version).unwrap_or(DEFAULT_VERSION)
    }
}
