//! Handlers for ecosystem formats (npm, Python, Maven, ...)
//!
//! The package manifest inside the pushed file carries name and version, so
//! these handlers push exactly one file and leave `--name`/`--version` out.

use super::{
    require_credentials, source_metadata, OperationContext, PackageHandler, MSG_PKG_URL,
    MSG_REGISTRY, MSG_SOURCE,
};
use crate::core::command::append_output_format;
use crate::core::config::{require, value, OperationConfig};
use crate::core::error::{PluginError, PluginResult};
use crate::core::package_type::PackageType;
use async_trait::async_trait;
use std::path::Path;
use tracing::info;

/// Single-file handler for one ecosystem format
#[derive(Debug, Clone, Copy)]
pub struct EcosystemHandler {
    package_type: PackageType,
}

impl EcosystemHandler {
    pub fn new(package_type: PackageType) -> Self {
        Self { package_type }
    }

    fn not_implemented(&self, operation: &'static str) -> PluginError {
        PluginError::NotImplemented {
            label: self.package_type.label(),
            operation,
        }
    }
}

#[async_trait]
impl PackageHandler for EcosystemHandler {
    async fn push(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()> {
        let label = self.package_type.label();
        info!("Executing {} push command", label);
        self.validate(config)?;

        let source = Path::new(value(&config.source).unwrap_or_default());
        let metadata = source_metadata(source).await?;
        if metadata.is_dir() {
            return Err(PluginError::DirectoryNotSupported(source.to_path_buf()));
        }
        info!("Source path: {}", source.display());

        let mut args = ctx.commands.build_push(
            self.package_type,
            config,
            "",
            source,
            config.name(),
            false,
        )?;
        append_output_format(&mut args);

        let artifact_name = match value(&config.name) {
            Some(name) => name.to_string(),
            None => source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        ctx.executor
            .run(
                &args,
                &format!(
                    "push {} artifact '{}' to registry '{}'",
                    label,
                    artifact_name,
                    config.registry()
                ),
            )
            .await
    }

    async fn pull(&self, _ctx: &OperationContext, _config: &OperationConfig) -> PluginResult<()> {
        Err(self.not_implemented("pull"))
    }

    async fn get(&self, _ctx: &OperationContext, _config: &OperationConfig) -> PluginResult<()> {
        Err(self.not_implemented("get"))
    }

    async fn delete(&self, _ctx: &OperationContext, _config: &OperationConfig) -> PluginResult<()> {
        Err(self.not_implemented("delete"))
    }

    fn validate(&self, config: &OperationConfig) -> PluginResult<()> {
        require(&config.registry, MSG_REGISTRY)?;
        require(&config.source, MSG_SOURCE)?;
        require_credentials(config)?;
        require(&config.pkg_url, MSG_PKG_URL)?;
        Ok(())
    }

    fn package_type(&self) -> PackageType {
        self.package_type
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::command::CommandBuilder;
    use crate::core::executor::CommandExecutor;
    use crate::test_utils::RecordingRunner;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn config(source: &Path) -> OperationConfig {
        OperationConfig {
            registry: Some("npm-local".to_string()),
            source: Some(source.display().to_string()),
            token: Some("tok".to_string()),
            account: Some("acct".to_string()),
            pkg_url: Some("https://pkg.example.com".to_string()),
            ..Default::default()
        }
    }

    fn context(temp_dir: &TempDir, runner: Arc<RecordingRunner>) -> OperationContext {
        OperationContext::new(
            CommandBuilder::new("hc", temp_dir.path().join(".harness")),
            CommandExecutor::new(runner),
        )
    }

    #[tokio::test]
    async fn test_push_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let package = temp_dir.path().join("left-pad-1.3.0.tgz");
        std::fs::write(&package, "tarball").unwrap();
        let runner = Arc::new(RecordingRunner::succeeding());
        let handler = EcosystemHandler::new(PackageType::Npm);

        handler
            .push(&context(&temp_dir, runner.clone()), &config(&package))
            .await
            .unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][2..5], ["push", "npm", "npm-local"]);
        assert!(!calls[0].contains(&"--name".to_string()));
        assert!(!calls[0].contains(&"--version".to_string()));
        assert_eq!(calls[0][calls[0].len() - 2..], ["--format", "json"]);
    }

    #[tokio::test]
    async fn test_push_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::succeeding());
        let handler = EcosystemHandler::new(PackageType::Python);

        let err = handler
            .push(&context(&temp_dir, runner.clone()), &config(temp_dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, PluginError::DirectoryNotSupported(_)));
        assert!(err
            .to_string()
            .starts_with("directories are not supported, only single files can be pushed"));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_push_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(RecordingRunner::succeeding());
        let handler = EcosystemHandler::new(PackageType::Maven);
        let missing = temp_dir.path().join("missing.jar");

        let err = handler
            .push(&context(&temp_dir, runner), &config(&missing))
            .await
            .unwrap_err();
        assert!(matches!(err, PluginError::SourceAccess { .. }));
    }

    #[test]
    fn test_validate_does_not_require_name() {
        let handler = EcosystemHandler::new(PackageType::Cargo);
        let config = config(Path::new("crate.crate"));
        assert!(handler.validate(&config).is_ok());

        let mut without_registry = config.clone();
        without_registry.registry = None;
        without_registry.source = None;
        assert_eq!(
            handler.validate(&without_registry).unwrap_err().to_string(),
            "registry name must be set"
        );
    }

    #[tokio::test]
    async fn test_other_operations_not_implemented() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, Arc::new(RecordingRunner::succeeding()));
        let handler = EcosystemHandler::new(PackageType::NuGet);
        let config = OperationConfig::default();

        let pull = handler.pull(&ctx, &config).await.unwrap_err();
        assert_eq!(pull.to_string(), "NuGet pull is not yet implemented");
        let get = handler.get(&ctx, &config).await.unwrap_err();
        assert_eq!(get.to_string(), "NuGet get is not yet implemented");
        let delete = handler.delete(&ctx, &config).await.unwrap_err();
        assert_eq!(delete.to_string(), "NuGet delete is not yet implemented");
    }
}
