//! Runtime adapter and container engine plumbing.
//!
//! [`adapter`] is the seam the owning agent talks to: sources readiness, the
//! capability query from a container manager to its runtime, and the command
//! runner. The connection module resolves the engine socket and turns
//! translated pod containers into `bollard` create calls. The engine socket
//! is resolved through a priority-based fallback chain:
//!
//! 1. CLI argument (`--engine-socket`)
//! 2. Config file (`engine_socket` in TOML)
//! 3. `PODSHIM_ENGINE_SOCKET` environment variable
//! 4. `DOCKER_HOST`, `CONTAINER_HOST`, `PODMAN_HOST` environment variables
//! 5. Platform default (`/var/run/docker.sock` on Unix)

pub mod adapter;
mod connection;

pub use adapter::{
    ContainerCommandRunner, ContainerManager, ContainerRuntime, CreatePodContainerFuture,
    EngineContainerManager, KubeSourcesReady, SourcesReady, UnimplementedCommandRunner,
    new_container_runner, runtime_from_manager,
};
pub use connection::{
    ContainerCreator, CreateContainerFuture, CreatedContainer, EngineConnector, SocketResolver,
    USERNS_MODE_HOST, build_container_body,
};
