//! Core modules: package dispatch, command building and execution

pub mod auth;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod operation;
pub mod package_type;
pub mod proxy;
pub mod registry;

// Re-export main types for convenience
pub use command::CommandBuilder;
pub use config::{OperationConfig, DEFAULT_VERSION};
pub use error::{PluginError, PluginResult};
pub use executor::{CommandExecutor, ProcessOutcome, ProcessRunner, SystemRunner};
pub use handlers::{
    EcosystemHandler, GenericHandler, OperationContext, PackageHandler, PushSummary,
};
pub use operation::{execute, Operation};
pub use package_type::PackageType;
pub use registry::HandlerRegistry;
