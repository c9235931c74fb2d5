//! The seam where the translation layer is wired into a node agent.
//!
//! The agent hands pods to a [`ContainerManager`]. Anything that needs the
//! runtime object asks the manager for it through [`runtime_from_manager`];
//! managers without one answer with `ContainerError::CapabilityNotSupported`
//! instead of being downcast.

use std::future::Future;
use std::pin::Pin;

use crate::engine::{ContainerCreator, CreatedContainer, EngineConnector};
use crate::error::{ContainerError, PodshimError};
use crate::pod::{Container, Pod};
use crate::translate::HostUserNamespacePolicy;

/// Boxed future returned by [`ContainerRuntime::create_pod_container`].
pub type CreatePodContainerFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CreatedContainer, PodshimError>> + Send + 'a>>;

/// Readiness of the pod sources feeding the agent.
pub trait SourcesReady {
    /// Register a pod source by name.
    fn add_source(&self, source: &str);

    /// Whether every registered source has delivered its initial state.
    fn all_ready(&self) -> bool;
}

/// Sources gate that is always open.
///
/// Real readiness lives in the runtime backend; this gate never holds the
/// agent's startup back and ignores registered sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KubeSourcesReady;

impl SourcesReady for KubeSourcesReady {
    fn add_source(&self, source: &str) {
        tracing::debug!(source, "ignoring pod source registration");
    }

    fn all_ready(&self) -> bool {
        true
    }
}

/// The runtime-facing object the rest of the agent drives.
pub trait ContainerRuntime: Send + Sync {
    /// Short name of the backing runtime, e.g. `docker`.
    fn runtime_type(&self) -> &'static str;

    /// Create one container of a pod from its translated specification.
    fn create_pod_container<'a>(
        &'a self,
        pod: &'a Pod,
        container: &'a Container,
    ) -> CreatePodContainerFuture<'a>;
}

/// A container manager as seen by the owning agent.
pub trait ContainerManager {
    /// Manager name used in diagnostics.
    fn name(&self) -> &str;

    /// The runtime capability, when this manager has one.
    fn runtime(&self) -> Option<&dyn ContainerRuntime> {
        None
    }
}

/// Narrow a container manager to its runtime object.
///
/// # Errors
///
/// Returns `ContainerError::CapabilityNotSupported` when the manager exposes
/// no runtime.
pub fn runtime_from_manager(
    manager: &dyn ContainerManager,
) -> Result<&dyn ContainerRuntime, PodshimError> {
    manager.runtime().ok_or_else(|| {
        PodshimError::from(ContainerError::CapabilityNotSupported {
            manager: String::from(manager.name()),
            capability: "runtime",
        })
    })
}

/// Runs commands inside running containers.
pub trait ContainerCommandRunner {
    /// Run `cmd` in `container_id` and return its combined output.
    ///
    /// # Errors
    ///
    /// Implementations report execution failures as `PodshimError`.
    fn run_in_container(&self, container_id: &str, cmd: &[String])
    -> Result<Vec<u8>, PodshimError>;
}

/// A command runner with no execution support yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnimplementedCommandRunner;

impl ContainerCommandRunner for UnimplementedCommandRunner {
    fn run_in_container(
        &self,
        container_id: &str,
        cmd: &[String],
    ) -> Result<Vec<u8>, PodshimError> {
        tracing::debug!(container_id, ?cmd, "run in container requested");
        Err(ContainerError::NotImplemented {
            operation: "run_in_container",
        }
        .into())
    }
}

/// Build the agent's container command runner.
#[must_use]
pub const fn new_container_runner() -> UnimplementedCommandRunner {
    UnimplementedCommandRunner
}

/// Container manager backed by an engine client.
///
/// It is its own runtime object: [`ContainerManager::runtime`] returns `self`.
#[derive(Debug)]
pub struct EngineContainerManager<C> {
    creator: C,
    policy: HostUserNamespacePolicy,
}

impl<C> EngineContainerManager<C> {
    /// Wrap an engine client with the pod's host user namespace policy.
    #[must_use]
    pub const fn new(creator: C, policy: HostUserNamespacePolicy) -> Self {
        Self { creator, policy }
    }

    /// The configured host user namespace policy.
    #[must_use]
    pub const fn policy(&self) -> HostUserNamespacePolicy {
        self.policy
    }
}

impl<C> ContainerRuntime for EngineContainerManager<C>
where
    C: ContainerCreator + Send + Sync,
{
    fn runtime_type(&self) -> &'static str {
        "docker"
    }

    fn create_pod_container<'a>(
        &'a self,
        pod: &'a Pod,
        container: &'a Container,
    ) -> CreatePodContainerFuture<'a> {
        Box::pin(EngineConnector::create_pod_container_async(
            &self.creator,
            pod,
            container,
            self.policy,
        ))
    }
}

impl<C> ContainerManager for EngineContainerManager<C>
where
    C: ContainerCreator + Send + Sync,
{
    fn name(&self) -> &str {
        "engine"
    }

    fn runtime(&self) -> Option<&dyn ContainerRuntime> {
        Some(self)
    }
}

impl<C> ContainerCommandRunner for EngineContainerManager<C> {
    fn run_in_container(
        &self,
        container_id: &str,
        cmd: &[String],
    ) -> Result<Vec<u8>, PodshimError> {
        UnimplementedCommandRunner.run_in_container(container_id, cmd)
    }
}
