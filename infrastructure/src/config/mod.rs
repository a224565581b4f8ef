//! Configuration file loading for alias-router
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ALIAS_ROUTER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./alias-router.toml` or `./.alias-router.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/alias-router/config.toml`
//! 5. Fallback: `~/.config/alias-router/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_ALIAS_FILE, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileResolverConfig, FileStoreConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
