//! Pod-to-runtime translation.
//!
//! Every function in this module is pure and total: it reads its input,
//! returns a freshly allocated result, and never fails. The one anomaly the
//! translators recognise, an unknown mount propagation mode, degrades to the
//! private default and is reported twice: as an [`Advisory`] in the returned
//! [`Translated`] value and as a `warn`-level `tracing` event.
//!
//! - [`env`]: container environment to runtime env list and `NAME=VALUE` lines
//! - [`mounts`]: host mounts to bind strings (`host:container[:opts]`)
//! - [`security`]: privilege flags to the host user namespace decision
//! - [`pod`]: all of the above for every container of a pod

pub mod env;
pub mod mounts;
pub mod pod;
pub mod security;

use std::fmt;

pub use env::{RuntimeEnvVar, to_flat_strings, to_runtime_env_list};
pub use mounts::{BindingString, MountAttribute, binding_string, to_binding_strings};
pub use pod::{ContainerTranslation, PodTranslation, translate_pod};
pub use security::{HostUserNamespacePolicy, requires_host_user_namespace};

/// A non-fatal anomaly observed during translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// A mount carried a propagation mode outside the known set; the mount
    /// was translated with private propagation.
    UnknownPropagation {
        /// Host path of the affected mount.
        host_path: String,
        /// The propagation text as supplied.
        raw: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPropagation { host_path, .. } => {
                write!(f, "unknown propagation mode for hostPath {host_path:?}")
            }
        }
    }
}

/// A translated value together with any advisories raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated<T> {
    /// The translated value.
    pub value: T,
    /// Advisories in the order they were raised.
    pub advisories: Vec<Advisory>,
}

impl<T> Translated<T> {
    /// Wrap a value that raised no advisories.
    #[must_use]
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    /// Whether any advisory was raised.
    #[must_use]
    pub const fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }

    /// Transform the value, keeping the advisories.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Translated<U> {
        Translated {
            value: f(self.value),
            advisories: self.advisories,
        }
    }

    /// Discard the advisories.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}
