//! Then-step assertions for runtime adapter behavioural scenarios.

use rstest_bdd_macros::then;

use super::state::{AdapterState, StepResult};

#[then("all sources are ready")]
fn all_sources_are_ready(adapter_state: &AdapterState) -> StepResult<()> {
    match adapter_state.ready.get() {
        Some(true) => Ok(()),
        other => Err(format!("expected sources to be ready, got {other:?}")),
    }
}

#[then("the runtime type is {expected}")]
fn runtime_type_is(adapter_state: &AdapterState, expected: String) -> StepResult<()> {
    let runtime_type = adapter_state
        .runtime_type
        .get()
        .ok_or_else(|| String::from("the runtime capability should have been granted"))?;
    if runtime_type == expected {
        return Ok(());
    }
    Err(format!("expected runtime type {expected}, got {runtime_type}"))
}

#[then("the error message is {expected}")]
fn error_message_is(adapter_state: &AdapterState, expected: String) -> StepResult<()> {
    let message = adapter_state
        .error
        .get()
        .ok_or_else(|| String::from("an error should have been recorded"))?;
    if message == expected {
        return Ok(());
    }
    Err(format!("expected error message {expected:?}, got {message:?}"))
}
