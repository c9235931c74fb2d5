//! Pod specification value types.
//!
//! These are the inputs of the translation layer: the environment, mounts,
//! and security context a lifecycle orchestrator declares for each container.
//! They deserialise from Kubernetes-style camelCase manifests.
//!
//! # Example Manifest
//!
//! ```json
//! {
//!   "name": "web",
//!   "namespace": "default",
//!   "spec": {
//!     "containers": [{
//!       "name": "nginx",
//!       "image": "nginx:1.27",
//!       "env": [{"name": "PORT", "value": "8080"}],
//!       "mounts": [{
//!         "hostPath": "/srv/www",
//!         "containerPath": "/usr/share/nginx/html",
//!         "readOnly": true,
//!         "seLinuxRelabel": false,
//!         "propagation": "HostToContainer"
//!       }],
//!       "securityContext": {"privileged": false}
//!     }]
//!   }
//! }
//! ```

mod manifest;
mod types;

pub use manifest::{ManifestFormat, load_pod, parse_pod};
pub use types::{
    Container, DEFAULT_NAMESPACE, EnvVar, EnvVarSource, FieldSelector, KeySelector, Mount,
    MountPropagation, Pod, PodSpec, SecurityContext,
};
