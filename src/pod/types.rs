//! Pod, container, environment, and mount value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace assigned to pods whose manifest omits one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// A reference to a key inside a named secret or config map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeySelector {
    /// Name of the referenced object.
    pub name: String,
    /// Key within the referenced object.
    pub key: String,
}

/// A reference to a field of the pod object, e.g. `metadata.name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSelector {
    /// Path of the field to select.
    pub field_path: String,
}

/// Indirect source for an environment variable value.
///
/// Accepted on input so manifests using it still load, but never resolved by
/// the translators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    /// Value taken from a secret key.
    pub secret_key_ref: Option<KeySelector>,
    /// Value taken from a config map key.
    pub config_map_key_ref: Option<KeySelector>,
    /// Value taken from a pod field.
    pub field_ref: Option<FieldSelector>,
}

/// An environment variable declared on a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    /// Variable name.
    pub name: String,

    /// Literal value; empty when the variable is sourced elsewhere.
    #[serde(default)]
    pub value: String,

    /// Indirect value source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    /// Build a literal `name=value` variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            value_from: None,
        }
    }
}

/// How mount events propagate between the host and a container.
///
/// Parsed from text so that values the crate does not know are kept verbatim
/// in [`MountPropagation::Unrecognized`] instead of being coerced. An explicit
/// `null` is the same as an absent field and decodes to `Private`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum MountPropagation {
    /// No propagation in either direction.
    #[default]
    Private,

    /// Mounts propagate host to container and container to host.
    Bidirectional,

    /// Mounts propagate from the host into the container only.
    HostToContainer,

    /// A propagation mode this crate does not recognise.
    Unrecognized(String),
}

impl MountPropagation {
    /// Canonical text for the mode; the raw text for unrecognised values.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Private => "Private",
            Self::Bidirectional => "Bidirectional",
            Self::HostToContainer => "HostToContainer",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for MountPropagation {
    fn from(value: &str) -> Self {
        match value {
            "Private" | "None" | "PROPAGATION_PRIVATE" => Self::Private,
            "Bidirectional" | "PROPAGATION_BIDIRECTIONAL" => Self::Bidirectional,
            "HostToContainer" | "PROPAGATION_HOST_TO_CONTAINER" => Self::HostToContainer,
            other => Self::Unrecognized(String::from(other)),
        }
    }
}

impl From<String> for MountPropagation {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Unrecognized(_) => Self::Unrecognized(value),
            known => known,
        }
    }
}

impl From<Option<String>> for MountPropagation {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl From<MountPropagation> for String {
    fn from(value: MountPropagation) -> Self {
        match value {
            MountPropagation::Unrecognized(raw) => raw,
            known => Self::from(known.as_str()),
        }
    }
}

impl fmt::Display for MountPropagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host path bound into a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mount {
    /// Path on the host. Expected to be non-empty.
    pub host_path: String,

    /// Path inside the container. Expected to be non-empty.
    pub container_path: String,

    /// Mount the path read-only.
    #[serde(default)]
    pub read_only: bool,

    /// Ask the runtime to relabel the volume for `SELinux`.
    #[serde(default, rename = "seLinuxRelabel")]
    pub selinux_relabel: bool,

    /// Mount propagation mode.
    #[serde(default)]
    pub propagation: MountPropagation,
}

impl Mount {
    /// Build a private, writable, unlabelled mount.
    #[must_use]
    pub fn new(host_path: impl Into<String>, container_path: impl Into<String>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            ..Self::default()
        }
    }

    /// Set the read-only flag.
    #[must_use]
    pub const fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the `SELinux` relabel flag.
    #[must_use]
    pub const fn selinux_relabel(mut self, relabel: bool) -> Self {
        self.selinux_relabel = relabel;
        self
    }

    /// Set the propagation mode.
    #[must_use]
    pub fn propagation(mut self, propagation: MountPropagation) -> Self {
        self.propagation = propagation;
        self
    }
}

/// The subset of a container security context the translators consult.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SecurityContext {
    /// Run the container privileged. Absent means not privileged.
    #[serde(default)]
    pub privileged: Option<bool>,
}

impl SecurityContext {
    /// Whether the context explicitly requests privileged mode.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        matches!(self.privileged, Some(true))
    }
}

/// A single container declared in a pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name, unique within the pod.
    pub name: String,

    /// Image reference.
    #[serde(default)]
    pub image: Option<String>,

    /// Command override.
    #[serde(default)]
    pub command: Option<Vec<String>>,

    /// Declared environment, in order.
    #[serde(default)]
    pub env: Vec<EnvVar>,

    /// Host mounts, in order.
    #[serde(default)]
    pub mounts: Vec<Mount>,

    /// Security context.
    #[serde(default)]
    pub security_context: Option<SecurityContext>,
}

impl Container {
    /// Whether this container's security context requests privileged mode.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.security_context
            .as_ref()
            .is_some_and(SecurityContext::is_privileged)
    }
}

/// The container list of a pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PodSpec {
    /// Containers in declaration order.
    #[serde(default)]
    pub containers: Vec<Container>,
}

/// A pod as handed over by the lifecycle orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pod {
    /// Pod name.
    pub name: String,

    /// Pod namespace.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Pod specification.
    #[serde(default)]
    pub spec: PodSpec,
}

impl Pod {
    /// Build a pod in the default namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, spec: PodSpec) -> Self {
        Self {
            name: name.into(),
            namespace: default_namespace(),
            spec,
        }
    }

    /// Engine-facing name for one of this pod's containers.
    #[must_use]
    pub fn container_name(&self, container: &Container) -> String {
        format!("{}_{}_{}", self.namespace, self.name, container.name)
    }
}

fn default_namespace() -> String {
    String::from(DEFAULT_NAMESPACE)
}
