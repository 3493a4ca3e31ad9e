//! Configuration file loading for tag-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TAG_QUORUM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./tag-quorum.toml` or `./.tag-quorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/tag-quorum/config.toml`
//! 5. Fallback: `~/.config/tag-quorum/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendConfig, FileConfig, FileEngineConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileRoleConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
