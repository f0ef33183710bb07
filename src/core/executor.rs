//! Subprocess execution for registry tool commands
//!
//! Commands are launched directly (no shell), so arguments containing spaces
//! or shell metacharacters reach the tool unchanged.

use crate::core::error::{PluginError, PluginResult};
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Placeholder written in place of secret values
pub const SECRET_MASK: &str = "********";

/// Flags whose following value must never reach the logs
const SECRET_FLAGS: &[&str] = &["--token"];

/// Copy of `args` with secret flag values replaced by [`SECRET_MASK`].
///
/// Handles both `--token value` and `--token=value`.
pub fn mask_secrets(args: &[String]) -> Vec<String> {
    let mut masked = Vec::with_capacity(args.len());
    let mut mask_next = false;

    for arg in args {
        if mask_next {
            masked.push(SECRET_MASK.to_string());
            mask_next = false;
            continue;
        }

        if SECRET_FLAGS.contains(&arg.as_str()) {
            mask_next = true;
            masked.push(arg.clone());
        } else if let Some(flag) = SECRET_FLAGS
            .iter()
            .find(|flag| arg.starts_with(&format!("{}=", flag)))
        {
            masked.push(format!("{}={}", flag, SECRET_MASK));
        } else {
            masked.push(arg.clone());
        }
    }

    masked
}

/// How a launched process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Process exited; `code` is `None` when it was terminated by a signal
    Exited { code: Option<i32> },
    /// The cancellation token fired and the process was killed
    Cancelled,
}

/// Port for launching processes
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `argv[0]` with `argv[1..]`, adding `env` to the inherited environment
    async fn run(
        &self,
        argv: &[String],
        env: &[(String, String)],
        cancel: &CancellationToken,
    ) -> std::io::Result<ProcessOutcome>;
}

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(
        &self,
        argv: &[String],
        env: &[(String, String)],
        cancel: &CancellationToken,
    ) -> std::io::Result<ProcessOutcome> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command")
        })?;

        let mut child = Command::new(program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        let status = tokio::select! {
            status = child.wait() => Some(status?),
            _ = cancel.cancelled() => None,
        };

        match status {
            Some(status) => Ok(ProcessOutcome::Exited {
                code: status.code(),
            }),
            None => {
                debug!("Cancellation requested, killing {}", program);
                child.kill().await?;
                Ok(ProcessOutcome::Cancelled)
            }
        }
    }
}

/// Logs, runs and classifies registry tool invocations
#[derive(Clone)]
pub struct CommandExecutor {
    runner: Arc<dyn ProcessRunner>,
    env: Vec<(String, String)>,
    cancel: CancellationToken,
}

impl CommandExecutor {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            env: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Executor backed by real child processes
    pub fn system() -> Self {
        Self::new(Arc::new(SystemRunner))
    }

    /// Extra environment variables for every child process
    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run `args`; any failure is reported as `failed to <operation>: <cause>`
    pub async fn run(&self, args: &[String], operation: &str) -> PluginResult<()> {
        if self.cancel.is_cancelled() {
            return Err(PluginError::Cancelled(operation.to_string()));
        }

        info!("Executing command: {}", mask_secrets(args).join(" "));

        let outcome = self
            .runner
            .run(args, &self.env, &self.cancel)
            .await
            .map_err(|e| PluginError::CommandFailed {
                operation: operation.to_string(),
                reason: if e.kind() == std::io::ErrorKind::NotFound {
                    format!(
                        "executable '{}' not found",
                        args.first().map(String::as_str).unwrap_or_default()
                    )
                } else {
                    e.to_string()
                },
            })?;

        match outcome {
            ProcessOutcome::Exited { code: Some(0) } => {
                info!("Successfully completed: {}", operation);
                Ok(())
            }
            ProcessOutcome::Exited { code } => Err(PluginError::CommandFailed {
                operation: operation.to_string(),
                reason: match code {
                    Some(code) => format!("exit status: {}", code),
                    None => "terminated by signal".to_string(),
                },
            }),
            ProcessOutcome::Cancelled => Err(PluginError::Cancelled(operation.to_string())),
        }
    }
}
