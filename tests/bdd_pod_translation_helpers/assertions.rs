//! Then-step assertions for pod translation behavioural scenarios.

use podshim::translate::{Advisory, BindingString};
use rstest_bdd_macros::then;

use super::state::{PodTranslationState, StepResult};

fn split_list(expected: &str) -> Vec<&str> {
    expected.split(',').map(str::trim).collect()
}

#[then("the binding strings are {expected}")]
fn binding_strings_are(
    pod_translation_state: &PodTranslationState,
    expected: String,
) -> StepResult<()> {
    let bindings = pod_translation_state
        .bindings
        .get()
        .ok_or_else(|| String::from("mounts should have been translated"))?;
    let actual: Vec<&str> = bindings.value.iter().map(BindingString::as_str).collect();

    // Binding options contain commas, so compare against the joined form.
    if actual.join(",") == expected {
        return Ok(());
    }
    Err(format!("expected bindings {expected}, got {actual:?}"))
}

#[then("no advisories are raised")]
fn no_advisories_raised(pod_translation_state: &PodTranslationState) -> StepResult<()> {
    let bindings = pod_translation_state
        .bindings
        .get()
        .ok_or_else(|| String::from("mounts should have been translated"))?;
    if bindings.has_advisories() {
        return Err(format!(
            "expected no advisories, got {:?}",
            bindings.advisories
        ));
    }
    Ok(())
}

#[then("an unknown propagation advisory is raised for {host_path}")]
fn unknown_propagation_advisory(
    pod_translation_state: &PodTranslationState,
    host_path: String,
) -> StepResult<()> {
    let bindings = pod_translation_state
        .bindings
        .get()
        .ok_or_else(|| String::from("mounts should have been translated"))?;

    match bindings.advisories.as_slice() {
        [Advisory::UnknownPropagation { host_path: actual, .. }] if *actual == host_path => Ok(()),
        other => Err(format!(
            "expected one unknown propagation advisory for {host_path}, got {other:?}"
        )),
    }
}

#[then("the flat environment is {expected}")]
fn flat_environment_is(
    pod_translation_state: &PodTranslationState,
    expected: String,
) -> StepResult<()> {
    let flat_env = pod_translation_state
        .flat_env
        .get()
        .ok_or_else(|| String::from("environment should have been flattened"))?;
    if flat_env == split_list(&expected) {
        return Ok(());
    }
    Err(format!("expected environment {expected}, got {flat_env:?}"))
}

#[then("the host user namespace is required")]
fn host_userns_required(pod_translation_state: &PodTranslationState) -> StepResult<()> {
    expect_host_userns(pod_translation_state, true)
}

#[then("the host user namespace is not required")]
fn host_userns_not_required(pod_translation_state: &PodTranslationState) -> StepResult<()> {
    expect_host_userns(pod_translation_state, false)
}

fn expect_host_userns(
    pod_translation_state: &PodTranslationState,
    expected: bool,
) -> StepResult<()> {
    let actual = pod_translation_state
        .host_userns
        .get()
        .ok_or_else(|| String::from("policy should have been evaluated"))?;
    if actual == expected {
        return Ok(());
    }
    Err(format!(
        "expected host user namespace requirement {expected}, got {actual}"
    ))
}
