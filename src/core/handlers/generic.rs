//! Generic package handler
//!
//! The only format that accepts a directory as its source. A directory push
//! walks the tree, pushes every eligible file on its own, and keeps going when
//! individual files fail; the outcome is tallied in a [`PushSummary`].

use super::{
    require_credentials, source_metadata, OperationContext, PackageHandler, MSG_NAME,
    MSG_PKG_URL, MSG_REGISTRY, MSG_SOURCE,
};
use crate::core::command::{append_output_format, path_argument};
use crate::core::config::{require, value, OperationConfig, DEFAULT_VERSION};
use crate::core::error::{PluginError, PluginResult};
use crate::core::package_type::PackageType;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Names starting with this byte are hidden from directory pushes
const HIDDEN_PREFIX: u8 = b'.';

/// An artifact name ending in one of these is incomplete
const NAME_SEPARATORS: [char; 2] = ['_', '-'];

/// Per-file tally of one directory push
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PushSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl PushSummary {
    /// True when every file was pushed
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    fn log(&self) {
        info!("=== DIRECTORY UPLOAD SUMMARY ===");
        info!("Total files processed: {}", self.total);
        info!("Successfully uploaded: {}", self.succeeded);
        if self.failed > 0 {
            warn!("Failed uploads: {}", self.failed);
        }
        if self.skipped > 0 {
            warn!("Skipped files: {}", self.skipped);
        }

        if self.is_complete() {
            info!("All files uploaded successfully");
        } else {
            warn!(
                "Directory upload completed with {} failures and {} skipped files",
                self.failed, self.skipped
            );
        }
    }
}

/// Checked on the raw name so non-UTF-8 names are still recognised
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .as_encoded_bytes()
        .starts_with(&[HIDDEN_PREFIX])
}

/// Files eligible for a directory push, in lexical walk order.
///
/// Hidden directories are pruned with their whole subtree and hidden files are
/// skipped. The root itself is never treated as hidden. Entries that cannot be
/// read are logged and left out.
pub fn collect_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        match entry {
            Ok(entry) if !entry.file_type().is_dir() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                warn!("Failed to access path '{}': {}", path, e);
            }
        }
    }

    files
}

/// Path of `file` relative to `root`, `/`-separated
fn relative_path(root: &Path, file: &Path) -> PluginResult<Option<String>> {
    let Ok(relative) = file.strip_prefix(root) else {
        return Ok(None);
    };
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| PluginError::NonUtf8Path(file.to_path_buf()))
        })
        .collect::<PluginResult<Vec<&str>>>()?;
    if parts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parts.join("/")))
    }
}

/// Artifact names may not be empty or end with a separator
pub fn is_valid_artifact_name(name: &str) -> bool {
    !name.is_empty() && !name.ends_with(&NAME_SEPARATORS[..])
}

/// Handler for the generic (default) format
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericHandler;

impl GenericHandler {
    pub fn new() -> Self {
        Self
    }

    /// Push every eligible file under the configured source directory.
    ///
    /// Per-file failures and skips are counted, not returned. Errors are only
    /// returned when no file is eligible or the operation is cancelled.
    pub async fn push_directory(
        &self,
        ctx: &OperationContext,
        config: &OperationConfig,
        version: &str,
    ) -> PluginResult<PushSummary> {
        let root = Path::new(value(&config.source).unwrap_or_default());
        info!("Source is a directory, pushing all files from: {}", root.display());

        let files = collect_files(root);
        if files.is_empty() {
            return Err(PluginError::NoFilesFound(root.to_path_buf()));
        }
        info!("Found {} files to push", files.len());

        let mut summary = PushSummary {
            total: files.len(),
            ..Default::default()
        };
        let artifact_name = config.name();

        for (index, file) in files.iter().enumerate() {
            if ctx.executor.is_cancelled() {
                summary.log();
                return Err(PluginError::Cancelled(format!(
                    "directory push stopped after {} of {} files",
                    index, summary.total
                )));
            }

            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            info!("[{}/{}] Pushing file: {}", index + 1, summary.total, file_name);

            if !is_valid_artifact_name(artifact_name) {
                warn!(
                    "Invalid artifact name '{}' for file '{}', skipping",
                    artifact_name, file_name
                );
                summary.skipped += 1;
                continue;
            }

            match self
                .push_single_file(ctx, config, version, file, artifact_name, Some(root))
                .await
            {
                Ok(()) => {
                    info!(
                        "Successfully pushed file: {} as artifact: {}",
                        file_name, artifact_name
                    );
                    summary.succeeded += 1;
                }
                Err(e) => {
                    error!("Failed to push file '{}': {}", file_name, e);
                    summary.failed += 1;
                }
            }
        }

        summary.log();
        Ok(summary)
    }

    /// Push one file. With `walk_root` set, `--path` carries the file's
    /// location below that directory.
    async fn push_single_file(
        &self,
        ctx: &OperationContext,
        config: &OperationConfig,
        version: &str,
        file_path: &Path,
        artifact_name: &str,
        walk_root: Option<&Path>,
    ) -> PluginResult<()> {
        let mut args = ctx.commands.build_push(
            PackageType::Generic,
            config,
            version,
            file_path,
            artifact_name,
            true,
        )?;

        if let Some(root) = walk_root {
            let relative = match relative_path(root, file_path)? {
                Some(relative) => relative,
                None => path_argument(file_path)?.to_string(),
            };
            args.push("--path".to_string());
            args.push(relative);
        }
        append_output_format(&mut args);

        ctx.executor
            .run(
                &args,
                &format!(
                    "push artifact '{}' to registry '{}'",
                    artifact_name,
                    config.registry()
                ),
            )
            .await
    }
}

#[async_trait]
impl PackageHandler for GenericHandler {
    async fn push(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()> {
        info!("Executing generic push command");
        self.validate(config)?;

        let version = match value(&config.version) {
            Some(version) => version,
            None => {
                info!("No version specified, using default: {}", DEFAULT_VERSION);
                DEFAULT_VERSION
            }
        };

        let source = Path::new(value(&config.source).unwrap_or_default());
        let metadata = source_metadata(source).await?;

        if metadata.is_dir() {
            self.push_directory(ctx, config, version).await.map(|_| ())
        } else {
            self.push_single_file(ctx, config, version, source, config.name(), None)
                .await
        }
    }

    async fn pull(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()> {
        info!("Executing generic pull command");

        require(&config.registry, MSG_REGISTRY)?;
        require(&config.name, "package name must be set")?;
        let version = require(&config.version, "package version must be set")?;
        let filename = require(&config.filename, "filename must be set")?;
        let destination = require(&config.destination, "destination path must be set")?;
        require_credentials(config)?;
        require(&config.pkg_url, MSG_PKG_URL)?;

        let args = ctx.commands.build_pull(PackageType::Generic, config);
        ctx.executor
            .run(
                &args,
                &format!(
                    "pull artifact '{}' (version '{}', file '{}') from registry '{}' to '{}'",
                    config.name(),
                    version,
                    filename,
                    config.registry(),
                    destination
                ),
            )
            .await
    }

    async fn get(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()> {
        info!("Executing generic get command");

        require(&config.registry, MSG_REGISTRY)?;
        require(&config.name, MSG_NAME)?;
        require_credentials(config)?;

        let args = ctx.commands.build_get(config);
        ctx.executor
            .run(
                &args,
                &format!(
                    "get info for artifact '{}' in registry '{}'",
                    config.name(),
                    config.registry()
                ),
            )
            .await
    }

    async fn delete(&self, ctx: &OperationContext, config: &OperationConfig) -> PluginResult<()> {
        info!("Executing generic delete command");

        require(&config.registry, MSG_REGISTRY)?;
        require(&config.name, MSG_NAME)?;
        require_credentials(config)?;

        let args = ctx.commands.build_delete(config);
        ctx.executor
            .run(
                &args,
                &format!(
                    "delete artifact '{}' from registry '{}'",
                    config.name(),
                    config.registry()
                ),
            )
            .await
    }

    fn validate(&self, config: &OperationConfig) -> PluginResult<()> {
        require(&config.registry, MSG_REGISTRY)?;
        require(&config.source, MSG_SOURCE)?;
        require(&config.name, MSG_NAME)?;
        require_credentials(config)?;
        require(&config.pkg_url, MSG_PKG_URL)?;
        Ok(())
    }

    fn package_type(&self) -> PackageType {
        PackageType::Generic
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "content").unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| relative_path(root, f).unwrap().unwrap())
            .collect()
    }

    #[test]
    fn test_collect_files_skips_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("b.txt"));
        touch(&root.join("a.txt"));
        touch(&root.join(".env"));
        touch(&root.join("nested/c.bin"));
        touch(&root.join("nested/.hidden"));
        touch(&root.join(".git/config"));
        touch(&root.join(".venv/lib/site.py"));
        touch(&root.join("nested/.cache/d.bin"));

        let files = collect_files(root);
        assert_eq!(
            relative_names(root, &files),
            vec!["a.txt", "b.txt", "nested/c.bin"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_files_skips_non_utf8_hidden_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("visible.txt"));
        touch(&root.join(OsStr::from_bytes(b".secret\xff")));
        touch(&root.join(OsStr::from_bytes(b".hid\xff")).join("inner.txt"));

        let files = collect_files(root);
        assert_eq!(files, vec![root.join("visible.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_path_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("/dist");
        let file = root.join(OsStr::from_bytes(b"app\xff.bin"));
        assert!(matches!(
            relative_path(root, &file),
            Err(PluginError::NonUtf8Path(_))
        ));
        assert_eq!(
            relative_path(root, &root.join("lib/a.bin")).unwrap(),
            Some("lib/a.bin".to_string())
        );
    }

    #[test]
    fn test_collect_files_from_hidden_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".dist");
        touch(&root.join("app.tgz"));

        let files = collect_files(&root);
        assert_eq!(relative_names(&root, &files), vec!["app.tgz"]);
    }

    #[test]
    fn test_collect_files_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_files(&temp_dir.path().join("missing")).is_empty());
    }

    #[test]
    fn test_artifact_name_validation() {
        assert!(is_valid_artifact_name("my-artifact"));
        assert!(is_valid_artifact_name("a"));
        assert!(!is_valid_artifact_name(""));
        assert!(!is_valid_artifact_name("my-artifact-"));
        assert!(!is_valid_artifact_name("my_artifact_"));
    }

    #[test]
    fn test_validate_order() {
        let handler = GenericHandler::new();
        let mut config = OperationConfig::default();

        let expected = [
            "registry name must be set",
            "source file path must be set",
            "artifact name must be set",
            "authentication token must be set",
            "account ID must be set",
            "package URL must be set",
        ];
        let fill: [fn(&mut OperationConfig); 6] = [
            |c| c.registry = Some("r".to_string()),
            |c| c.source = Some("s".to_string()),
            |c| c.name = Some("n".to_string()),
            |c| c.token = Some("t".to_string()),
            |c| c.account = Some("a".to_string()),
            |c| c.pkg_url = Some("u".to_string()),
        ];

        for (message, set_field) in expected.iter().zip(fill.iter()) {
            assert_eq!(handler.validate(&config).unwrap_err().to_string(), *message);
            set_field(&mut config);
        }
        assert!(handler.validate(&config).is_ok());
    }

    #[test]
    fn test_summary_completeness() {
        let summary = PushSummary {
            total: 3,
            succeeded: 3,
            ..Default::default()
        };
        assert!(summary.is_complete());

        let summary = PushSummary {
            total: 3,
            succeeded: 2,
            skipped: 1,
            ..Default::default()
        };
        assert!(!summary.is_complete());
    }
}
