//! Configuration for the starforge sprite generator.
//!
//! Settings persist to disk as `config.ron` and are overridden per run by
//! command-line flags. Every section is `#[serde(default)]`, so older or
//! partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BatchConfig, Config, DebugConfig, OutputConfig, SpriteConfig, SpriteSize, default_config_dir,
};
pub use error::ConfigError;
