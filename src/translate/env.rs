//! Container environment translation.
//!
//! Values sourced through `valueFrom` (secrets, config maps, pod fields) are
//! not resolved here. Such variables pass through with their literal `value`,
//! which is usually empty.

use serde::Serialize;

use crate::pod::EnvVar;

/// A `name`/`value` pair in the shape the runtime consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeEnvVar {
    /// Variable name.
    pub name: String,
    /// Variable value.
    pub value: String,
}

/// Copy declared variables into runtime pairs, preserving order and duplicates.
#[must_use]
pub fn to_runtime_env_list(envs: &[EnvVar]) -> Vec<RuntimeEnvVar> {
    envs.iter()
        .map(|env| {
            if env.value_from.is_some() {
                tracing::debug!(name = %env.name, "valueFrom reference is not resolved");
            }
            RuntimeEnvVar {
                name: env.name.clone(),
                value: env.value.clone(),
            }
        })
        .collect()
}

/// Render declared variables as `name=value` lines in input order.
///
/// Values are not escaped: an `=` or whitespace in a value is passed through
/// as-is.
#[must_use]
pub fn to_flat_strings(envs: &[EnvVar]) -> Vec<String> {
    envs.iter()
        .map(|env| format!("{}={}", env.name, env.value))
        .collect()
}
