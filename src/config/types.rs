//! Configuration value types.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::translate::HostUserNamespacePolicy;

/// Translation behaviour configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Which containers decide whether a pod uses the host user namespace.
    pub host_userns_policy: HostUserNamespacePolicy,
}

/// Root application configuration.
///
/// The precedence order (lowest to highest) is: defaults, configuration file,
/// environment variables, command-line arguments.
///
/// Configuration files are discovered in this order:
/// 1. Path specified via `PODSHIM_CONFIG_PATH` environment variable
/// 2. `.podshim.toml` in the current working directory
/// 3. `.podshim.toml` in the home directory
/// 4. `~/.config/podshim/config.toml` (XDG default)
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "PODSHIM",
    discovery(
        app_name = "podshim",
        env_var = "PODSHIM_CONFIG_PATH",
        config_file_name = "config.toml",
        dotfile_name = ".podshim.toml",
        config_cli_long = "config",
        config_cli_visible = true,
    )
)]
pub struct AppConfig {
    /// The container engine socket path or URL.
    pub engine_socket: Option<String>,

    /// Translation configuration.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub translation: TranslationConfig,
}
