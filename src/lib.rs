//! Pod-to-runtime translation for a Docker-compatible container engine.
//!
//! `podshim` sits between a node agent and a container engine. It takes the
//! pod and container descriptions the agent works with and turns them into
//! the parameters the engine understands: environment lists, bind-mount
//! strings, and the decision whether a pod shares the host user namespace.
//!
//! Translation is pure and never fails. Anomalies such as an unknown mount
//! propagation mode are reported as advisories next to the translated value
//! and logged through `tracing`.
//!
//! # Modules
//!
//! - [`config`]: Configuration system with layered precedence (CLI > env > file > defaults)
//! - [`engine`]: Engine connection, container creation, and the agent-facing adapter
//! - [`error`]: Semantic error types for the application
//! - [`pod`]: Pod data model and manifest loading
//! - [`translate`]: Environment, mount, and security translation

pub mod config;
pub mod engine;
pub mod error;
pub mod pod;
pub mod translate;
