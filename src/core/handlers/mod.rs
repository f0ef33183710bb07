//! Per-format package handlers

pub mod ecosystem;
pub mod generic;

use crate::core::command::CommandBuilder;
use crate::core::config::{require, OperationConfig};
use crate::core::error::{PluginError, PluginResult};
use crate::core::executor::CommandExecutor;
use crate::core::package_type::PackageType;
use async_trait::async_trait;
use std::path::Path;

pub use ecosystem::EcosystemHandler;
pub use generic::{GenericHandler, PushSummary};

/// Collaborators a handler needs to talk to the registry tool
#[derive(Clone)]
pub struct OperationContext {
    pub commands: CommandBuilder,
    pub executor: CommandExecutor,
}

impl OperationContext {
    pub fn new(commands: CommandBuilder, executor: CommandExecutor) -> Self {
        Self { commands, executor }
    }
}

/// Capability set implemented once per package type
#[async_trait]
pub trait PackageHandler: Send + Sync {
    /// Upload artifacts to the registry
    async fn push(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()>;

    /// Download artifacts from the registry
    async fn pull(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()>;

    /// Retrieve artifact information
    async fn get(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()>;

    /// Remove artifacts from the registry
    async fn delete(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()>;

    /// Check the push configuration; the first missing field wins
    fn validate(&self, config: &OperationConfig) -> PluginResult<()>;

    fn package_type(&self) -> PackageType;
}

pub(crate) const MSG_REGISTRY: &str = "registry name must be set";
pub(crate) const MSG_SOURCE: &str = "source file path must be set";
pub(crate) const MSG_NAME: &str = "artifact name must be set";
pub(crate) const MSG_TOKEN: &str = "authentication token must be set";
pub(crate) const MSG_ACCOUNT: &str = "account ID must be set";
pub(crate) const MSG_PKG_URL: &str = "package URL must be set";

/// Credential checks shared by every operation
pub(crate) fn require_credentials(config: &OperationConfig) -> PluginResult<()> {
    require(&config.token, MSG_TOKEN)?;
    require(&config.account, MSG_ACCOUNT)?;
    Ok(())
}

/// Stat the source, wrapping failures with the path
pub(crate) async fn source_metadata(source: &Path) -> PluginResult<std::fs::Metadata> {
    tokio::fs::metadata(source)
        .await
        .map_err(|e| PluginError::SourceAccess {
            path: source.to_path_buf(),
            source: e,
        })
}
