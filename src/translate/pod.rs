//! Whole-pod translation report.

use serde::Serialize;

use super::{
    Advisory, BindingString, HostUserNamespacePolicy, RuntimeEnvVar, to_binding_strings,
    to_flat_strings, to_runtime_env_list,
};
use crate::pod::{Container, Pod};

/// Runtime parameters derived for one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerTranslation {
    /// Container name as declared in the pod.
    pub name: String,
    /// Structured environment.
    pub env: Vec<RuntimeEnvVar>,
    /// `NAME=VALUE` lines.
    pub env_lines: Vec<String>,
    /// Bind-mount strings.
    pub binds: Vec<BindingString>,
    /// Whether this container itself is privileged.
    pub privileged: bool,
    /// Advisory messages raised for this container.
    pub advisories: Vec<String>,
}

/// Runtime parameters derived for a pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodTranslation {
    /// Pod name.
    pub name: String,
    /// Pod namespace.
    pub namespace: String,
    /// Whether the pod needs the host user namespace under the chosen policy.
    pub host_user_namespace: bool,
    /// Per-container parameters in declaration order.
    pub containers: Vec<ContainerTranslation>,
}

impl PodTranslation {
    /// Every advisory raised across the pod's containers.
    pub fn advisories(&self) -> impl Iterator<Item = &str> {
        self.containers
            .iter()
            .flat_map(|container| container.advisories.iter().map(String::as_str))
    }
}

fn translate_container(container: &Container) -> ContainerTranslation {
    let binds = to_binding_strings(&container.mounts);
    ContainerTranslation {
        name: container.name.clone(),
        env: to_runtime_env_list(&container.env),
        env_lines: to_flat_strings(&container.env),
        binds: binds.value,
        privileged: container.is_privileged(),
        advisories: binds.advisories.iter().map(Advisory::to_string).collect(),
    }
}

/// Translate every container of a pod.
#[must_use]
pub fn translate_pod(pod: &Pod, policy: HostUserNamespacePolicy) -> PodTranslation {
    PodTranslation {
        name: pod.name.clone(),
        namespace: pod.namespace.clone(),
        host_user_namespace: policy.evaluate(&pod.spec),
        containers: pod.spec.containers.iter().map(translate_container).collect(),
    }
}
