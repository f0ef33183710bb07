//! Main CLI application structure
//!
//! Every option can also be supplied through its `PLUGIN_*` environment
//! variable, which is how pipeline runners pass step settings.

use artifact_plugin::core::proxy::{parse_bool_or_default, proxy_environment_from_env};
use artifact_plugin::{
    execute, CommandBuilder, CommandExecutor, HandlerRegistry, OperationConfig, OperationContext,
};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::cli::error::CliResult;

/// Artifact registry plugin - push, pull, inspect and delete artifacts
#[derive(Debug, Parser)]
#[command(name = "artifact-plugin")]
#[command(version = artifact_plugin::VERSION)]
#[command(about = "Push, pull, inspect and delete artifacts in a package registry")]
#[command(long_about = "Push, pull, inspect and delete artifacts in a package registry.\n\n\
                         Commands: push|upload (default), pull|download, get|info, delete|remove\n\
                         Package types: generic (default), npm, python, maven, nuget, go, rpm,\n\
                         cargo, composer, conda, dart\n\n\
                         Examples:\n\
                           PLUGIN_REGISTRY=builds PLUGIN_SOURCE=./dist PLUGIN_NAME=app artifact-plugin\n\
                           artifact-plugin --command pull --registry builds --name app \\\n\
                             --artifact-version 1.0.0 --filename app.tgz --destination ./out")]
pub struct Cli {
    /// Operation to run
    #[arg(long, env = "PLUGIN_COMMAND")]
    pub command: Option<String>,

    /// Artifact format
    #[arg(long, env = "PLUGIN_PACKAGE_TYPE")]
    pub package_type: Option<String>,

    /// Registry API token
    #[arg(long, env = "PLUGIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Account identifier
    #[arg(long, env = "PLUGIN_ACCOUNT")]
    pub account: Option<String>,

    /// Organization identifier
    #[arg(long, env = "PLUGIN_ORG")]
    pub org: Option<String>,

    /// Project identifier
    #[arg(long, env = "PLUGIN_PROJECT")]
    pub project: Option<String>,

    /// API base URL
    #[arg(long, env = "PLUGIN_API_URL")]
    pub api_url: Option<String>,

    /// Package endpoint URL
    #[arg(long, env = "PLUGIN_PKG_URL")]
    pub pkg_url: Option<String>,

    /// Registry name
    #[arg(long, env = "PLUGIN_REGISTRY")]
    pub registry: Option<String>,

    /// File or directory to push
    #[arg(long, env = "PLUGIN_SOURCE")]
    pub source: Option<String>,

    /// Artifact name
    #[arg(long, env = "PLUGIN_NAME")]
    pub name: Option<String>,

    /// Artifact version (push defaults to v1)
    #[arg(long = "artifact-version", env = "PLUGIN_VERSION")]
    pub artifact_version: Option<String>,

    /// Artifact description
    #[arg(long, env = "PLUGIN_DESCRIPTION")]
    pub description: Option<String>,

    /// File name inside the artifact
    #[arg(long, env = "PLUGIN_FILENAME")]
    pub filename: Option<String>,

    /// Pull destination path
    #[arg(long, env = "PLUGIN_DESTINATION")]
    pub destination: Option<String>,

    /// Forward HARNESS_*_PROXY variables to the registry tool (true/1)
    #[arg(long, env = "PLUGIN_ENABLE_PROXY")]
    pub enable_proxy: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "PLUGIN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Path to the registry tool binary
    #[arg(long, env = "PLUGIN_CLI_BINARY")]
    pub cli_binary: Option<String>,
}

impl Cli {
    /// Operation parameters carried by this invocation
    pub fn operation_config(&self) -> OperationConfig {
        OperationConfig {
            token: self.token.clone(),
            account: self.account.clone(),
            org: self.org.clone(),
            project: self.project.clone(),
            api_url: self.api_url.clone(),
            pkg_url: self.pkg_url.clone(),
            registry: self.registry.clone(),
            name: self.name.clone(),
            version: self.artifact_version.clone(),
            description: self.description.clone(),
            filename: self.filename.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
        }
    }

    /// Execute the selected operation
    pub async fn execute(self) -> CliResult<()> {
        artifact_plugin::init_logging(self.log_level.as_deref());

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling operation");
                on_interrupt.cancel();
            }
        });

        let enable_proxy = parse_bool_or_default(false, self.enable_proxy.as_deref());
        let executor = CommandExecutor::system()
            .with_env(proxy_environment_from_env(enable_proxy))
            .with_cancellation(cancel);
        let commands = CommandBuilder::from_environment(self.cli_binary.as_deref());
        let ctx = OperationContext::new(commands, executor);

        let registry = HandlerRegistry::new();
        let config = self.operation_config();

        execute(
            &registry,
            &ctx,
            self.command.as_deref(),
            self.package_type.as_deref(),
            &config,
        )
        .await?;

        Ok(())
    }
}
