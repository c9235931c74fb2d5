//! Host mount translation into runtime bind strings.
//!
//! A bind string has the form `<host>:<container>[:<opts>]`, where `<opts>` is
//! a comma-separated list drawn from, in this order:
//!
//! - `ro` when the mount is read-only
//! - `Z` when `SELinux` relabeling is requested
//! - `rshared` for bidirectional propagation, `rslave` for host-to-container
//!
//! # Relabeling
//!
//! Relabeling should only be requested when the pod supplies an `SELinux`
//! context. Without one, the runtime labels the volume with the container's
//! randomly allocated MCS category, and only the first container to mount it
//! can then access it. The translator forwards the flag without checking.

use std::fmt;

use serde::Serialize;

use super::{Advisory, Translated};
use crate::pod::{Mount, MountPropagation};

/// A single bind-mount option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountAttribute {
    /// Read-only mount (`ro`).
    ReadOnly,
    /// Private unshared `SELinux` relabel (`Z`).
    Relabel,
    /// Recursive shared propagation (`rshared`).
    Shared,
    /// Recursive slave propagation (`rslave`).
    Slave,
}

impl MountAttribute {
    /// The option text understood by the runtime.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "ro",
            Self::Relabel => "Z",
            Self::Shared => "rshared",
            Self::Slave => "rslave",
        }
    }
}

/// A runtime bind-mount string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BindingString(String);

impl BindingString {
    fn build(mount: &Mount, attributes: &[MountAttribute]) -> Self {
        let base = format!("{}:{}", mount.host_path, mount.container_path);
        if attributes.is_empty() {
            return Self(base);
        }

        let options: Vec<&str> = attributes.iter().map(|attr| attr.as_str()).collect();
        Self(format!("{base}:{}", options.join(",")))
    }

    /// Borrow the bind string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the bind string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BindingString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BindingString> for String {
    fn from(value: BindingString) -> Self {
        value.0
    }
}

/// Propagation attribute for a mode, or an advisory when the mode is unknown.
fn propagation_attribute(mount: &Mount) -> Result<Option<MountAttribute>, Advisory> {
    match &mount.propagation {
        MountPropagation::Private => Ok(None),
        MountPropagation::Bidirectional => Ok(Some(MountAttribute::Shared)),
        MountPropagation::HostToContainer => Ok(Some(MountAttribute::Slave)),
        MountPropagation::Unrecognized(raw) => Err(Advisory::UnknownPropagation {
            host_path: mount.host_path.clone(),
            raw: raw.clone(),
        }),
    }
}

/// Translate one mount.
///
/// An unrecognised propagation mode yields a bind string with private
/// propagation and the matching advisory; a `warn` event is also emitted.
#[must_use]
pub fn binding_string(mount: &Mount) -> (BindingString, Option<Advisory>) {
    let mut attributes = Vec::with_capacity(3);
    if mount.read_only {
        attributes.push(MountAttribute::ReadOnly);
    }
    if mount.selinux_relabel {
        attributes.push(MountAttribute::Relabel);
    }

    let advisory = match propagation_attribute(mount) {
        Ok(propagation) => {
            attributes.extend(propagation);
            None
        }
        Err(advisory) => {
            tracing::warn!(
                host_path = %mount.host_path,
                propagation = %mount.propagation,
                "{advisory}; falling back to private"
            );
            Some(advisory)
        }
    };

    (BindingString::build(mount, &attributes), advisory)
}

/// Translate mounts into bind strings, one per mount, in input order.
#[must_use]
pub fn to_binding_strings(mounts: &[Mount]) -> Translated<Vec<BindingString>> {
    let mut translated = Translated::clean(Vec::with_capacity(mounts.len()));
    for mount in mounts {
        let (bind, advisory) = binding_string(mount);
        translated.value.push(bind);
        translated.advisories.extend(advisory);
    }
    translated
}
