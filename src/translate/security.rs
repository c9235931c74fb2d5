//! Host user namespace decision.
//!
//! Privileged containers cannot run inside a remapped user namespace, so the
//! runtime must be told to use the host's. The decision historically looks at
//! the first container of the pod only. That narrowing is kept as the default
//! policy; [`HostUserNamespacePolicy::AnyContainer`] is the alternative that
//! inspects every container.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::pod::{Container, PodSpec};

/// Which containers decide whether the pod needs the host user namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostUserNamespacePolicy {
    /// Only the first container's security context is consulted.
    #[default]
    FirstContainer,
    /// Any privileged container requires the host user namespace.
    AnyContainer,
}

impl HostUserNamespacePolicy {
    /// Apply the policy to a pod spec.
    #[must_use]
    pub fn evaluate(self, spec: &PodSpec) -> bool {
        match self {
            Self::FirstContainer => requires_host_user_namespace(spec),
            Self::AnyContainer => spec.containers.iter().any(Container::is_privileged),
        }
    }
}

/// Whether the pod's first container is explicitly privileged.
///
/// Returns `false` for a pod without containers, for a first container with
/// no security context, and when the privileged flag is absent or `false`.
/// Containers after the first are not inspected.
#[must_use]
pub fn requires_host_user_namespace(spec: &PodSpec) -> bool {
    spec.containers
        .first()
        .is_some_and(Container::is_privileged)
}
