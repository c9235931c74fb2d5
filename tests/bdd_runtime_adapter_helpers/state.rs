//! Shared behavioural-test state for runtime adapter scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Step result type for runtime adapter BDD tests.
pub type StepResult<T> = Result<T, String>;

/// Which container manager a scenario exercises.
#[derive(Clone, Debug)]
pub enum ManagerKind {
    /// The engine-backed manager, which exposes a runtime.
    Engine,
    /// A manager with the given name and no runtime capability.
    Named(String),
}

/// Shared scenario state for runtime adapter behavioural tests.
#[derive(Default, ScenarioState)]
pub struct AdapterState {
    /// Sources registered with the gate.
    pub(crate) sources: Slot<Vec<String>>,

    /// Readiness reported by the gate.
    pub(crate) ready: Slot<bool>,

    /// Manager under test.
    pub(crate) manager: Slot<ManagerKind>,

    /// Runtime type reported by a successful capability query.
    pub(crate) runtime_type: Slot<String>,

    /// Message of the last error.
    pub(crate) error: Slot<String>,
}

/// Fixture providing fresh state for each runtime adapter scenario.
#[fixture]
pub fn adapter_state() -> AdapterState {
    let state = AdapterState::default();
    state.sources.set(Vec::new());
    state
}
