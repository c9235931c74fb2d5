//! Container creation from translated pod containers.
//!
//! This module feeds the translators' output into `Bollard`
//! container-create payloads: `NAME=VALUE` env lines, bind strings, the
//! container's privileged flag, and the pod's host user namespace decision.

use std::future::Future;
use std::pin::Pin;

use bollard::Docker;
use bollard::models::{ContainerCreateBody, ContainerCreateResponse, HostConfig};
use bollard::query_parameters::{CreateContainerOptions, CreateContainerOptionsBuilder};

use super::EngineConnector;
use crate::error::{ConfigError, ContainerError, PodshimError};
use crate::pod::{Container, Pod};
use crate::translate::{
    Advisory, BindingString, HostUserNamespacePolicy, Translated, to_binding_strings,
    to_flat_strings,
};

/// `HostConfig.userns_mode` value that selects the host user namespace.
pub const USERNS_MODE_HOST: &str = "host";

/// Boxed future type returned by [`ContainerCreator`] implementors.
pub type CreateContainerFuture<'a> = Pin<
    Box<dyn Future<Output = Result<ContainerCreateResponse, bollard::errors::Error>> + Send + 'a>,
>;

/// Behaviour required to create a container via a backing engine client.
///
/// This abstraction exists to keep container-creation logic testable without a
/// running daemon.
pub trait ContainerCreator {
    /// Create a container from `Bollard` options and body payload.
    fn create_container(
        &self,
        options: Option<CreateContainerOptions>,
        config: ContainerCreateBody,
    ) -> CreateContainerFuture<'_>;
}

impl ContainerCreator for Docker {
    fn create_container(
        &self,
        options: Option<CreateContainerOptions>,
        config: ContainerCreateBody,
    ) -> CreateContainerFuture<'_> {
        Box::pin(async move { Self::create_container(self, options, config).await })
    }
}

/// Outcome of creating one pod container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedContainer {
    /// Engine-assigned container ID.
    pub id: String,

    /// Engine-facing container name.
    pub name: String,

    /// Translation advisories raised while building the payload.
    pub advisories: Vec<Advisory>,

    /// Warnings returned by the engine.
    pub warnings: Vec<String>,
}

/// Build the create payload for one container of a pod.
///
/// Empty env and mount lists are left unset rather than sent as empty arrays.
///
/// # Errors
///
/// Returns `ConfigError::MissingRequired` when the container has no image or
/// the image is whitespace only.
pub fn build_container_body(
    pod: &Pod,
    container: &Container,
    policy: HostUserNamespacePolicy,
) -> Result<Translated<ContainerCreateBody>, PodshimError> {
    let image = validate_image(container.image.as_deref())?;
    let binds = to_binding_strings(&container.mounts);
    let env = to_flat_strings(&container.env);
    let host_userns = policy.evaluate(&pod.spec);

    Ok(binds.map(|bind_strings| ContainerCreateBody {
        image: Some(String::from(image)),
        cmd: container.command.clone(),
        env: (!env.is_empty()).then_some(env),
        host_config: Some(build_host_config(
            bind_strings,
            container.is_privileged(),
            host_userns,
        )),
        ..ContainerCreateBody::default()
    }))
}

impl EngineConnector {
    /// Create one pod container through a client abstraction (async version).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` when the container image is
    /// missing or empty; the engine is not called in that case.
    ///
    /// Returns `ContainerError::CreateFailed` when the engine rejects the
    /// create request.
    pub async fn create_pod_container_async<C: ContainerCreator>(
        creator: &C,
        pod: &Pod,
        container: &Container,
        policy: HostUserNamespacePolicy,
    ) -> Result<CreatedContainer, PodshimError> {
        let name = pod.container_name(container);
        let translated = build_container_body(pod, container, policy)?;
        let options = CreateContainerOptionsBuilder::new().name(&name).build();

        tracing::debug!(
            container = %name,
            binds = ?translated.value.host_config.as_ref().and_then(|hc| hc.binds.as_ref()),
            "creating container"
        );

        let response = creator
            .create_container(Some(options), translated.value)
            .await
            .map_err(|error| {
                PodshimError::from(ContainerError::CreateFailed {
                    container: name.clone(),
                    message: error.to_string(),
                })
            })?;

        tracing::info!(container = %name, id = %response.id, "container created");

        Ok(CreatedContainer {
            id: response.id,
            name,
            advisories: translated.advisories,
            warnings: response.warnings,
        })
    }

    /// Create one pod container, blocking on the supplied runtime handle.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_pod_container_async`].
    pub fn create_pod_container<C: ContainerCreator>(
        runtime: &tokio::runtime::Handle,
        creator: &C,
        pod: &Pod,
        container: &Container,
        policy: HostUserNamespacePolicy,
    ) -> Result<CreatedContainer, PodshimError> {
        runtime.block_on(Self::create_pod_container_async(
            creator, pod, container, policy,
        ))
    }
}

fn validate_image(image: Option<&str>) -> Result<&str, PodshimError> {
    image
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            PodshimError::from(ConfigError::MissingRequired {
                field: String::from("image"),
            })
        })
}

fn build_host_config(binds: Vec<BindingString>, privileged: bool, host_userns: bool) -> HostConfig {
    HostConfig {
        binds: (!binds.is_empty()).then(|| binds.into_iter().map(String::from).collect()),
        privileged: Some(privileged),
        userns_mode: host_userns.then(|| String::from(USERNS_MODE_HOST)),
        ..HostConfig::default()
    }
}
