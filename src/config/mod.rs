//! Configuration system for podshim.
//!
//! This module provides the configuration structures and CLI definitions for the
//! podshim binary. Configuration loading and precedence merging is handled by
//! the `ortho_config` crate. Precedence: CLI flags override environment
//! variables, which override configuration files, which override defaults.
//!
//! The configuration file is expected at `~/.config/podshim/config.toml` by default.
//!
//! # Example Configuration
//!
//! ```toml
//! engine_socket = "unix:///run/user/1000/podman/podman.sock"
//!
//! [translation]
//! host_userns_policy = "first-container"
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, ManifestArgs};
pub use loader::{env_var_names, load_config};
pub use types::{AppConfig, TranslationConfig};
