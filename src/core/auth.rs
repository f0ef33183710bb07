//! Auth descriptor consumed by the registry tool
//!
//! Some package formats read credentials from `~/.harness/auth.json` instead of
//! command-line flags, so the descriptor is rewritten before every push.

use crate::core::config::OperationConfig;
use crate::core::error::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const AUTH_DIR_NAME: &str = ".harness";
const AUTH_FILE_NAME: &str = "auth.json";
#[cfg(unix)]
const AUTH_FILE_MODE: u32 = 0o600;

/// Credentials written for the registry tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDescriptor {
    pub base_url: String,
    pub token: String,
    pub account_id: String,
}

impl AuthDescriptor {
    pub fn from_config(config: &OperationConfig) -> Self {
        Self {
            base_url: config.pkg_url().to_string(),
            token: format!("CIManager {}", config.token()),
            account_id: config.account().to_string(),
        }
    }
}

/// Default descriptor directory (`~/.harness`)
pub fn default_auth_dir() -> PluginResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PluginError::AuthFile("failed to get home directory".to_string()))?;
    Ok(home.join(AUTH_DIR_NAME))
}

/// Write the descriptor into `dir`, creating it when needed. Returns the file path.
///
/// Concurrent writers on one host race on this file; pipeline steps are
/// expected to run one at a time.
pub fn write_auth_file(dir: &Path, config: &OperationConfig) -> PluginResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        PluginError::AuthFile(format!(
            "failed to create directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let descriptor = AuthDescriptor::from_config(config);
    let content = serde_json::to_string_pretty(&descriptor)
        .map_err(|e| PluginError::AuthFile(format!("failed to serialize auth config: {}", e)))?;

    let path = dir.join(AUTH_FILE_NAME);
    let write_error =
        |e: std::io::Error| PluginError::AuthFile(format!("failed to write {}: {}", path.display(), e));

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(AUTH_FILE_MODE);
    }
    let mut file = options.open(&path).map_err(write_error)?;

    // An existing file keeps its old mode through `open`
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(AUTH_FILE_MODE))
            .map_err(|e| {
                PluginError::AuthFile(format!("failed to set file permissions: {}", e))
            })?;
    }

    file.write_all(content.as_bytes()).map_err(write_error)?;

    debug!("Wrote auth file: {}", path.display());
    Ok(path)
}
