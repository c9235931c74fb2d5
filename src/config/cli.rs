//! Command-line argument definitions for podshim.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use crate::translate::HostUserNamespacePolicy;

/// Command-line interface for podshim.
#[derive(Debug, Parser)]
#[command(name = "podshim")]
#[command(
    author,
    version,
    about = "Translate pod specifications into container runtime parameters"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Container engine socket path or URL.
    #[arg(long, global = true)]
    pub engine_socket: Option<String>,

    /// Which containers decide whether a pod uses the host user namespace.
    #[arg(long, global = true, value_enum)]
    pub host_userns_policy: Option<HostUserNamespacePolicy>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the runtime parameters derived from a pod manifest.
    Translate(ManifestArgs),

    /// Create every container of a pod manifest on the container engine.
    Create(ManifestArgs),

    /// Report whether pod sources are ready.
    Ready,
}

/// Arguments for subcommands that read a pod manifest.
#[derive(Debug, Parser)]
pub struct ManifestArgs {
    /// Path to a JSON or TOML pod manifest.
    #[arg(required = true)]
    pub manifest: Utf8PathBuf,
}
