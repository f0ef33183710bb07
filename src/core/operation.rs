//! Operation keywords and top-level dispatch

use crate::core::config::OperationConfig;
use crate::core::error::{PluginError, PluginResult};
use crate::core::handlers::OperationContext;
use crate::core::registry::HandlerRegistry;
use std::fmt;
use tracing::info;

/// Registry operation selected by the command keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Push,
    Pull,
    Get,
    Delete,
}

impl Operation {
    /// Parse a command keyword; unset or empty means push
    pub fn parse(command: Option<&str>) -> PluginResult<Self> {
        let command = command.map(str::trim).unwrap_or_default();
        if command.is_empty() {
            info!("No command specified, defaulting to: push");
            return Ok(Operation::Push);
        }

        match command.to_ascii_lowercase().as_str() {
            "push" | "upload" => Ok(Operation::Push),
            "pull" | "download" => Ok(Operation::Pull),
            "get" | "info" => Ok(Operation::Get),
            "delete" | "remove" => Ok(Operation::Delete),
            _ => Err(PluginError::UnsupportedCommand(command.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Push => "push",
            Operation::Pull => "pull",
            Operation::Get => "get",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run one operation: parse the command, resolve the handler, dispatch.
pub async fn execute(
    registry: &HandlerRegistry,
    ctx: &OperationContext,
    command: Option<&str>,
    package_type: Option<&str>,
    config: &OperationConfig,
) -> PluginResult<()> {
    info!("Starting artifact registry operation");

    let operation = Operation::parse(command)?;
    let package_type = package_type.unwrap_or_default();
    if package_type.trim().is_empty() {
        info!("No package type specified, using default: generic");
    }
    let handler = registry.resolve(package_type)?;

    info!(
        "Executing {} command for {} package",
        operation,
        handler.package_type().label()
    );

    match operation {
        Operation::Push => handler.push(ctx, config).await,
        Operation::Pull => handler.pull(ctx, config).await,
        Operation::Get => handler.get(ctx, config).await,
        Operation::Delete => handler.delete(ctx, config).await,
    }
}
