//! Given/when step definitions for runtime adapter behavioural scenarios.

use bollard::models::{ContainerCreateBody, ContainerCreateResponse};
use bollard::query_parameters::CreateContainerOptions;
use podshim::engine::{
    ContainerCommandRunner, ContainerCreator, ContainerManager, CreateContainerFuture,
    EngineContainerManager, KubeSourcesReady, SourcesReady, new_container_runner,
    runtime_from_manager,
};
use podshim::translate::HostUserNamespacePolicy;
use rstest_bdd_macros::{given, when};

use super::state::{AdapterState, ManagerKind, StepResult};

/// Engine client that answers every create call with a fixed ID.
struct FixedIdCreator;

impl ContainerCreator for FixedIdCreator {
    fn create_container(
        &self,
        _options: Option<CreateContainerOptions>,
        _config: ContainerCreateBody,
    ) -> CreateContainerFuture<'_> {
        Box::pin(async {
            Ok(ContainerCreateResponse {
                id: String::from("fixed"),
                warnings: vec![],
            })
        })
    }
}

/// A manager that only knows its name.
struct NamedManager(String);

impl ContainerManager for NamedManager {
    fn name(&self) -> &str {
        &self.0
    }
}

#[given("a sources gate with source {source} registered")]
fn sources_gate_with_source(adapter_state: &AdapterState, source: String) {
    let mut sources = adapter_state.sources.get().unwrap_or_default();
    sources.push(source);
    adapter_state.sources.set(sources);
}

#[given("an engine-backed container manager")]
fn engine_backed_manager(adapter_state: &AdapterState) {
    adapter_state.manager.set(ManagerKind::Engine);
}

#[given("a container manager named {name} without a runtime")]
fn manager_without_runtime(adapter_state: &AdapterState, name: String) {
    adapter_state.manager.set(ManagerKind::Named(name));
}

#[when("source readiness is checked")]
fn source_readiness_is_checked(adapter_state: &AdapterState) {
    let gate = KubeSourcesReady;
    for source in adapter_state.sources.get().unwrap_or_default() {
        gate.add_source(&source);
    }
    adapter_state.ready.set(gate.all_ready());
}

#[when("the runtime capability is requested")]
fn runtime_capability_requested(adapter_state: &AdapterState) -> StepResult<()> {
    let kind = adapter_state
        .manager
        .get()
        .ok_or_else(|| String::from("a container manager must be declared first"))?;

    let result = match kind {
        ManagerKind::Engine => {
            let manager =
                EngineContainerManager::new(FixedIdCreator, HostUserNamespacePolicy::default());
            runtime_from_manager(&manager).map(|runtime| runtime.runtime_type().to_owned())
        }
        ManagerKind::Named(name) => runtime_from_manager(&NamedManager(name))
            .map(|runtime| runtime.runtime_type().to_owned()),
    };

    match result {
        Ok(runtime_type) => adapter_state.runtime_type.set(runtime_type),
        Err(error) => adapter_state.error.set(error.to_string()),
    }
    Ok(())
}

#[when("a command is run in container {container_id}")]
fn command_is_run(adapter_state: &AdapterState, container_id: String) -> StepResult<()> {
    let runner = new_container_runner();
    match runner.run_in_container(&container_id, &[String::from("true")]) {
        Ok(output) => Err(format!(
            "expected command execution to be unsupported, got {} bytes",
            output.len()
        )),
        Err(error) => {
            adapter_state.error.set(error.to_string());
            Ok(())
        }
    }
}
