//! Argument vectors for the registry tool
//!
//! Grammar consumed:
//! `<bin> artifact push <type> <registry> <path> [--name N --version V] --token T
//! --account A [--org O] [--project P] --pkg-url U [--api-url U] [--description D]
//! [--filename F] [--path rel] --format json`

use crate::core::auth::{default_auth_dir, write_auth_file};
use crate::core::config::{value, OperationConfig};
use crate::core::error::{PluginError, PluginResult};
use crate::core::package_type::PackageType;
use std::path::{Path, PathBuf};

/// Top-level sub-command of the registry tool
const ARTIFACT_COMMAND: &str = "artifact";

const DEFAULT_BINARY: &str = "hc";

#[cfg(windows)]
const WINDOWS_BINARY: &str = "C:/bin/hc.exe";

/// Locate the registry tool. An explicit override always wins.
pub fn resolve_binary(override_path: Option<&str>) -> String {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return path.to_string();
    }

    #[cfg(windows)]
    {
        if std::path::Path::new(WINDOWS_BINARY).exists() {
            return WINDOWS_BINARY.to_string();
        }
    }

    DEFAULT_BINARY.to_string()
}

/// Append `flag value` when the field is set
fn push_optional(args: &mut Vec<String>, flag: &str, field: &Option<String>) {
    if let Some(v) = value(field) {
        args.push(flag.to_string());
        args.push(v.to_string());
    }
}

/// `path` as a tool argument. Non-UTF-8 paths are an error.
pub fn path_argument(path: &Path) -> PluginResult<&str> {
    path.to_str()
        .ok_or_else(|| PluginError::NonUtf8Path(path.to_path_buf()))
}

/// Terminate a command with the machine-readable output flag
pub fn append_output_format(args: &mut Vec<String>) {
    args.push("--format".to_string());
    args.push("json".to_string());
}

/// Builds registry tool invocations
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    binary: String,
    /// `None` resolves `~/.harness` when a push first needs it
    auth_dir: Option<PathBuf>,
}

impl CommandBuilder {
    pub fn new(binary: impl Into<String>, auth_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            auth_dir: Some(auth_dir.into()),
        }
    }

    /// Builder for the resolved binary and the per-user auth directory
    pub fn from_environment(binary_override: Option<&str>) -> Self {
        Self {
            binary: resolve_binary(binary_override),
            auth_dir: None,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Directory the auth descriptor is written to
    pub fn auth_dir(&self) -> PluginResult<PathBuf> {
        match &self.auth_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_auth_dir(),
        }
    }

    fn base(&self, verb: &str) -> Vec<String> {
        vec![
            self.binary.clone(),
            ARTIFACT_COMMAND.to_string(),
            verb.to_string(),
        ]
    }

    fn push_context_flags(args: &mut Vec<String>, config: &OperationConfig) {
        push_optional(args, "--org", &config.org);
        push_optional(args, "--project", &config.project);
    }

    /// Push command for one file. Writes the auth descriptor first.
    ///
    /// `include_name_and_version` is set for generic pushes; ecosystem formats
    /// take name and version from the package manifest. The caller appends
    /// `--path` and the output format.
    pub fn build_push(
        &self,
        package_type: PackageType,
        config: &OperationConfig,
        version: &str,
        file_path: &Path,
        artifact_name: &str,
        include_name_and_version: bool,
    ) -> PluginResult<Vec<String>> {
        let file_path = path_argument(file_path)?;
        write_auth_file(&self.auth_dir()?, config)?;

        let mut args = self.base("push");
        args.push(package_type.cli_name());
        args.push(config.registry().to_string());
        args.push(file_path.to_string());

        if include_name_and_version {
            args.push("--name".to_string());
            args.push(artifact_name.to_string());
            args.push("--version".to_string());
            args.push(version.to_string());
        }

        args.push("--token".to_string());
        args.push(config.token().to_string());
        args.push("--account".to_string());
        args.push(config.account().to_string());
        Self::push_context_flags(&mut args, config);

        args.push("--pkg-url".to_string());
        args.push(config.pkg_url().to_string());
        push_optional(&mut args, "--api-url", &config.api_url);
        push_optional(&mut args, "--description", &config.description);
        push_optional(&mut args, "--filename", &config.filename);

        Ok(args)
    }

    /// Pull `<name>/<version>/<filename>` into the destination
    pub fn build_pull(&self, package_type: PackageType, config: &OperationConfig) -> Vec<String> {
        let package_path = format!(
            "{}/{}/{}",
            config.name(),
            value(&config.version).unwrap_or_default(),
            value(&config.filename).unwrap_or_default()
        );

        let mut args = self.base("pull");
        args.push(package_type.cli_name());
        args.push(config.registry().to_string());
        args.push(package_path);
        args.push(value(&config.destination).unwrap_or_default().to_string());

        args.push("--token".to_string());
        args.push(config.token().to_string());
        args.push("--account".to_string());
        args.push(config.account().to_string());
        args.push("--pkg-url".to_string());
        args.push(config.pkg_url().to_string());
        Self::push_context_flags(&mut args, config);
        push_optional(&mut args, "--api-url", &config.api_url);

        append_output_format(&mut args);
        args
    }

    pub fn build_get(&self, config: &OperationConfig) -> Vec<String> {
        self.build_by_name("get", config)
    }

    pub fn build_delete(&self, config: &OperationConfig) -> Vec<String> {
        self.build_by_name("delete", config)
    }

    /// `<bin> artifact <verb> <name> --registry R ...`
    fn build_by_name(&self, verb: &str, config: &OperationConfig) -> Vec<String> {
        let mut args = self.base(verb);
        args.push(config.name().to_string());

        args.push("--registry".to_string());
        args.push(config.registry().to_string());
        args.push("--token".to_string());
        args.push(config.token().to_string());
        args.push("--account".to_string());
        args.push(config.account().to_string());
        Self::push_context_flags(&mut args, config);
        push_optional(&mut args, "--api-url", &config.api_url);

        append_output_format(&mut args);
        args
    }
}
