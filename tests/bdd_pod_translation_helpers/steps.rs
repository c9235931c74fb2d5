//! Given/when step definitions for pod translation behavioural scenarios.

use podshim::pod::{Container, EnvVar, Mount, MountPropagation, PodSpec, SecurityContext};
use podshim::translate::{HostUserNamespacePolicy, to_binding_strings, to_flat_strings};
use rstest_bdd_macros::{given, when};

use super::state::{PodTranslationState, StepResult};

#[given("a mount from {host} to {container}")]
fn mount_from_to(pod_translation_state: &PodTranslationState, host: String, container: String) {
    let mut mounts = pod_translation_state.mounts.get().unwrap_or_default();
    mounts.push(Mount::new(host, container));
    pod_translation_state.mounts.set(mounts);
}

#[given("the mount is read-only")]
fn mount_is_read_only(pod_translation_state: &PodTranslationState) -> StepResult<()> {
    update_last_mount(pod_translation_state, |mount| mount.read_only(true))
}

#[given("the mount requests SELinux relabelling")]
fn mount_requests_relabel(pod_translation_state: &PodTranslationState) -> StepResult<()> {
    update_last_mount(pod_translation_state, |mount| mount.selinux_relabel(true))
}

#[given("the mount propagation is {mode}")]
fn mount_propagation_is(
    pod_translation_state: &PodTranslationState,
    mode: String,
) -> StepResult<()> {
    let propagation = MountPropagation::from(mode);
    update_last_mount(pod_translation_state, move |mount| {
        mount.propagation(propagation)
    })
}

fn update_last_mount(
    pod_translation_state: &PodTranslationState,
    update: impl FnOnce(Mount) -> Mount,
) -> StepResult<()> {
    let mut mounts = pod_translation_state.mounts.get().unwrap_or_default();
    let last = mounts
        .pop()
        .ok_or_else(|| String::from("a mount must be declared first"))?;
    mounts.push(update(last));
    pod_translation_state.mounts.set(mounts);
    Ok(())
}

#[given("an environment variable {name} with value {value}")]
fn environment_variable(pod_translation_state: &PodTranslationState, name: String, value: String) {
    let mut env = pod_translation_state.env.get().unwrap_or_default();
    env.push(EnvVar::new(name, value));
    pod_translation_state.env.set(env);
}

#[given("a privileged container named {name}")]
fn privileged_container(pod_translation_state: &PodTranslationState, name: String) {
    push_container(pod_translation_state, name, true);
}

#[given("an unprivileged container named {name}")]
fn unprivileged_container(pod_translation_state: &PodTranslationState, name: String) {
    push_container(pod_translation_state, name, false);
}

fn push_container(pod_translation_state: &PodTranslationState, name: String, privileged: bool) {
    let mut containers = pod_translation_state.containers.get().unwrap_or_default();
    containers.push(Container {
        name,
        security_context: Some(SecurityContext {
            privileged: Some(privileged),
        }),
        ..Container::default()
    });
    pod_translation_state.containers.set(containers);
}

#[when("the mounts are translated")]
fn mounts_are_translated(pod_translation_state: &PodTranslationState) {
    let mounts = pod_translation_state.mounts.get().unwrap_or_default();
    pod_translation_state
        .bindings
        .set(to_binding_strings(&mounts));
}

#[when("the environment is flattened")]
fn environment_is_flattened(pod_translation_state: &PodTranslationState) {
    let env = pod_translation_state.env.get().unwrap_or_default();
    pod_translation_state.flat_env.set(to_flat_strings(&env));
}

#[when("the first-container policy is evaluated")]
fn first_container_policy_evaluated(pod_translation_state: &PodTranslationState) {
    evaluate(pod_translation_state, HostUserNamespacePolicy::FirstContainer);
}

#[when("the any-container policy is evaluated")]
fn any_container_policy_evaluated(pod_translation_state: &PodTranslationState) {
    evaluate(pod_translation_state, HostUserNamespacePolicy::AnyContainer);
}

fn evaluate(pod_translation_state: &PodTranslationState, policy: HostUserNamespacePolicy) {
    let spec = PodSpec {
        containers: pod_translation_state.containers.get().unwrap_or_default(),
    };
    pod_translation_state
        .host_userns
        .set(policy.evaluate(&spec));
}
