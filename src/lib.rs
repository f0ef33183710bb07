//! # Artifact Registry Plugin
//!
//! Build-pipeline step that pushes, pulls, inspects and deletes artifacts in a
//! multi-format package registry. All network work is delegated to an external
//! registry tool; this crate selects the handler for the package format, builds
//! the tool invocations and runs them.
//!
//! ## Architecture
//!
//! - [`HandlerRegistry`] maps package types to [`PackageHandler`]s
//! - [`GenericHandler`] pushes single files or whole directory trees
//! - [`EcosystemHandler`] pushes single packages for npm, Python, Maven, ...
//! - [`CommandBuilder`] and [`CommandExecutor`] produce and run tool commands
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use artifact_plugin::{
//!     execute, CommandBuilder, CommandExecutor, HandlerRegistry, OperationConfig,
//!     OperationContext,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = HandlerRegistry::new();
//!     let ctx = OperationContext::new(
//!         CommandBuilder::from_environment(None),
//!         CommandExecutor::system(),
//!     );
//!
//!     let config = OperationConfig {
//!         registry: Some("builds".to_string()),
//!         source: Some("./dist".to_string()),
//!         name: Some("my-app".to_string()),
//!         token: Some("token".to_string()),
//!         account: Some("account".to_string()),
//!         pkg_url: Some("https://pkg.example.com".to_string()),
//!         ..Default::default()
//!     };
//!
//!     execute(&registry, &ctx, Some("push"), Some("generic"), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
#[doc(hidden)]
pub mod test_utils;

pub use core::command::CommandBuilder;
pub use core::config::{OperationConfig, DEFAULT_VERSION};
pub use core::error::{PluginError, PluginResult};
pub use core::executor::{CommandExecutor, ProcessOutcome, ProcessRunner, SystemRunner};
pub use core::handlers::{
    EcosystemHandler, GenericHandler, OperationContext, PackageHandler, PushSummary,
};
pub use core::operation::{execute, Operation};
pub use core::package_type::PackageType;
pub use core::registry::HandlerRegistry;

/// Version of the plugin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when no level is configured
const DEFAULT_LOG_FILTER: &str = "artifact_plugin=info";

/// Initialize logging (safe for testing).
///
/// `level` (trace, debug, info, warn, error) wins over `RUST_LOG`.
pub fn init_logging(level: Option<&str>) {
    // Only initialize logging once
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter = match level.map(str::trim).filter(|l| !l.is_empty()) {
            Some(level) => EnvFilter::try_new(format!(
                "artifact_plugin={}",
                level.to_ascii_lowercase()
            ))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        };

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();

        // This will fail silently if already initialized
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
