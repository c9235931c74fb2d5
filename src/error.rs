//! Semantic error types for the podshim crate.
//!
//! Translation itself never fails: the only anomaly it knows about (an
//! unrecognised mount propagation mode) is reported as an
//! [`Advisory`](crate::translate::Advisory) alongside the translated value.
//! The enums here cover the surrounding plumbing: configuration, manifest
//! loading, and the container runtime seam. Callers that need to inspect a
//! failure match on these; the binary converts them into `eyre::Report` at
//! its boundary.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found at the expected path.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path where the configuration file was expected.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A required configuration value is missing.
    #[error("missing required configuration: {field}")]
    MissingRequired {
        /// The name of the missing field.
        field: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The `OrthoConfig` library returned an error during configuration loading.
    #[error("configuration loading failed: {0}")]
    OrthoConfig(Arc<ortho_config::OrthoError>),
}

/// Errors that can occur while loading a pod manifest from disk.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file does not exist or could not be opened.
    #[error("pod manifest not found: {path}")]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The manifest could not be read or decoded.
    #[error("failed to parse pod manifest '{path}': {message}")]
    ParseError {
        /// The manifest path.
        path: PathBuf,
        /// A description of the decode failure.
        message: String,
    },

    /// The manifest extension does not name a supported format.
    #[error("unsupported pod manifest format '{extension}' (expected json or toml)")]
    UnsupportedFormat {
        /// The offending file extension, or an empty string when absent.
        extension: String,
    },
}

/// Errors that can occur at the container runtime seam.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Failed to connect to the container engine socket.
    #[error("failed to connect to container engine: {message}")]
    ConnectionFailed {
        /// A description of the connection failure.
        message: String,
    },

    /// Failed to create the async runtime used by blocking helpers.
    #[error("failed to create async runtime: {message}")]
    RuntimeCreationFailed {
        /// A description of the runtime creation failure.
        message: String,
    },

    /// Failed to create a container.
    #[error("failed to create container '{container}': {message}")]
    CreateFailed {
        /// The pod-scoped container name that was being created.
        container: String,
        /// A description of the creation failure.
        message: String,
    },

    /// A container manager does not expose the requested capability.
    #[error("container manager '{manager}' does not support capability '{capability}'")]
    CapabilityNotSupported {
        /// The name of the manager that was queried.
        manager: String,
        /// The capability that was requested.
        capability: &'static str,
    },

    /// The requested operation exists as a capability but has no behaviour yet.
    #[error("operation '{operation}' is not implemented")]
    NotImplemented {
        /// The operation that was invoked.
        operation: &'static str,
    },
}

/// Top-level error type for the podshim crate.
///
/// At the application boundary (`main.rs`) these errors are converted to
/// `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum PodshimError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred while loading a pod manifest.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// An error occurred at the container runtime seam.
    #[error(transparent)]
    Container(#[from] ContainerError),
}

/// A specialised `Result` type for podshim operations.
pub type Result<T> = std::result::Result<T, PodshimError>;
