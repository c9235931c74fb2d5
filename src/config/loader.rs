//! Configuration loading with layered precedence.
//!
//! This module provides functions to load configuration with the precedence order
//! (lowest to highest): application defaults, configuration file, environment
//! variables, command-line arguments.
//!
//! `MergeComposer` is driven by hand rather than through the derived `load()`
//! because the `Cli` struct owns subcommand dispatch and the `--config` flag,
//! and because environment values are validated eagerly here: an unknown
//! `PODSHIM_TRANSLATION_HOST_USERNS_POLICY` is an error, not a silent default.

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::ValueEnum;
use ortho_config::discovery::ConfigDiscovery;
use ortho_config::serde_json::{self, Map, Value};
use ortho_config::{MergeComposer, toml};

use crate::config::{AppConfig, Cli};
use crate::error::{ConfigError, Result};
use crate::translate::HostUserNamespacePolicy;

// ============================================================================
// Environment Variable Specification Table
// ============================================================================

/// The type of value expected from an environment variable.
#[derive(Clone, Copy)]
enum EnvVarType {
    /// String value (always accepted).
    String,
    /// A [`HostUserNamespacePolicy`] name. Invalid values return an error.
    UsernsPolicy,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// The environment variable name (e.g., `PODSHIM_ENGINE_SOCKET`).
    env_var: &'static str,
    /// The JSON path segments (e.g., `["translation", "host_userns_policy"]`).
    path: &'static [&'static str],
    /// The expected value type.
    var_type: EnvVarType,
}

/// Table of all environment variables and their JSON paths.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        env_var: "PODSHIM_ENGINE_SOCKET",
        path: &["engine_socket"],
        var_type: EnvVarType::String,
    },
    EnvVarSpec {
        env_var: "PODSHIM_TRANSLATION_HOST_USERNS_POLICY",
        path: &["translation", "host_userns_policy"],
        var_type: EnvVarType::UsernsPolicy,
    },
];

/// Returns the list of environment variable names recognised by the config loader.
///
/// Tests use this to clear every `PODSHIM_*` variable without keeping a
/// second hard-coded list in sync.
#[must_use]
pub fn env_var_names() -> Vec<&'static str> {
    ENV_VAR_SPECS.iter().map(|spec| spec.env_var).collect()
}

/// Load a configuration file and push it to the composer.
///
/// Uses `cap_std::fs_utf8` for capability-oriented filesystem access: the
/// parent directory is opened and the file is read from there.
fn load_config_file(path: &Utf8PathBuf, composer: &mut MergeComposer) -> Result<()> {
    let current_dir = Utf8PathBuf::from(".");
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| current_dir.as_ref());
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    let value =
        toml::from_str::<serde_json::Value>(&content).map_err(|e| ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        })?;

    composer.push_file(value, Some(path.clone()));
    Ok(())
}

/// Load configuration with full layer precedence.
///
/// Sources, later overriding earlier:
/// 1. Application defaults defined in the struct
/// 2. Configuration file (`--config`, `PODSHIM_CONFIG_PATH`, or discovered)
/// 3. Environment variables prefixed with `PODSHIM_`
/// 4. Command-line arguments (from the provided `Cli`)
///
/// # Errors
///
/// Returns `ConfigError` if configuration loading fails due to:
/// - An explicit `--config` path that does not exist
/// - Malformed configuration files
/// - Invalid typed environment variable values
/// - Values that do not deserialise after merging
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut composer = MergeComposer::new();

    // Layer 1: Defaults (serialised from AppConfig::default()).
    let defaults =
        serde_json::to_value(AppConfig::default()).map_err(|e| ConfigError::ParseError {
            message: format!("failed to serialise defaults: {e}"),
        })?;
    composer.push_defaults(defaults);

    // Layer 2: Configuration file. An explicit --config must exist; discovered
    // candidates are skipped when absent.
    if let Some(path) = cli.config.as_ref().filter(|p| !p.exists()) {
        return Err(ConfigError::FileNotFound {
            path: path.clone().into_std_path_buf(),
        }
        .into());
    }
    let config_path: Option<Utf8PathBuf> = cli.config.clone().or_else(|| {
        let discovery = ConfigDiscovery::builder("podshim")
            .env_var("PODSHIM_CONFIG_PATH")
            .config_file_name("config.toml")
            .dotfile_name(".podshim.toml")
            .build();
        discovery
            .candidates()
            .into_iter()
            .filter(|p| p.exists())
            .find_map(|p| Utf8PathBuf::try_from(p).ok())
    });

    if let Some(ref path) = config_path {
        tracing::debug!(%path, "loading configuration file");
        load_config_file(path, &mut composer)?;
    }

    // Layer 3: Environment variables.
    let env_values = collect_env_vars()?;
    if !env_values.is_null() {
        composer.push_environment(env_values);
    }

    // Layer 4: CLI overrides.
    let cli_overrides = build_cli_overrides(cli)?;
    if !cli_overrides.is_null() {
        composer.push_cli(cli_overrides);
    }

    let config =
        AppConfig::merge_from_layers(composer.layers()).map_err(ConfigError::OrthoConfig)?;

    Ok(config)
}

/// Collect `PODSHIM_*` environment variables into a JSON value.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if a typed environment variable has an
/// unparseable value.
fn collect_env_vars() -> Result<Value> {
    let mut root = Map::new();

    for spec in ENV_VAR_SPECS {
        let Ok(raw_value) = std::env::var(spec.env_var) else {
            continue;
        };

        let json_value = match spec.var_type {
            EnvVarType::String => Value::String(raw_value),
            EnvVarType::UsernsPolicy => {
                let policy = HostUserNamespacePolicy::from_str(&raw_value, true).map_err(|_| {
                    ConfigError::InvalidValue {
                        field: spec.env_var.to_owned(),
                        reason: format!(
                            "expected first-container or any-container, got '{raw_value}'"
                        ),
                    }
                })?;
                policy_value(policy)?
            }
        };

        insert_at_path(&mut root, spec.path, json_value);
    }

    if root.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(root))
    }
}

/// Serialise a policy to the text form its `Deserialize` impl accepts.
fn policy_value(policy: HostUserNamespacePolicy) -> Result<Value> {
    serde_json::to_value(policy).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to serialise host_userns_policy: {e}"),
        }
        .into()
    })
}

/// Insert a value at a nested path in a JSON map, creating intermediate
/// objects as needed.
fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((&field, parents)) = path.split_last() else {
        return;
    };

    let mut current = root;
    for &segment in parents {
        let entry = current
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(obj) = entry.as_object_mut() else {
            return;
        };
        current = obj;
    }

    current.insert(field.to_owned(), value);
}

/// Build a JSON value containing CLI overrides.
fn build_cli_overrides(cli: &Cli) -> Result<Value> {
    let mut overrides = Map::new();

    if let Some(ref socket) = cli.engine_socket {
        overrides.insert("engine_socket".to_owned(), Value::String(socket.clone()));
    }

    if let Some(policy) = cli.host_userns_policy {
        insert_at_path(
            &mut overrides,
            &["translation", "host_userns_policy"],
            policy_value(policy)?,
        );
    }

    if overrides.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::Object(overrides))
    }
}
