//! Shared behavioural-test state for pod translation scenarios.

use podshim::pod::{Container, EnvVar, Mount};
use podshim::translate::{BindingString, Translated};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Step result type for pod translation BDD tests.
pub type StepResult<T> = Result<T, String>;

/// Shared scenario state for pod translation behavioural tests.
#[derive(Default, ScenarioState)]
pub struct PodTranslationState {
    /// Mounts declared so far, in declaration order.
    pub(crate) mounts: Slot<Vec<Mount>>,

    /// Environment variables declared so far.
    pub(crate) env: Slot<Vec<EnvVar>>,

    /// Containers declared so far.
    pub(crate) containers: Slot<Vec<Container>>,

    /// Result of the most recent mount translation.
    pub(crate) bindings: Slot<Translated<Vec<BindingString>>>,

    /// Result of the most recent environment flattening.
    pub(crate) flat_env: Slot<Vec<String>>,

    /// Result of the most recent host user namespace evaluation.
    pub(crate) host_userns: Slot<bool>,
}

/// Fixture providing fresh state for each pod translation scenario.
#[fixture]
pub fn pod_translation_state() -> PodTranslationState {
    let state = PodTranslationState::default();
    state.mounts.set(Vec::new());
    state.env.set(Vec::new());
    state.containers.set(Vec::new());
    state
}
