//! `podshim` application entry point.
//!
//! The binary translates pod manifests into container runtime parameters and
//! can create the resulting containers on a Docker-compatible engine. It uses
//! `eyre` for opaque error handling at the application boundary, converting
//! domain-specific errors into human-readable reports.
//!
//! Configuration is loaded with layered precedence via `OrthoConfig`:
//! 1. Application defaults
//! 2. Configuration file (`~/.config/podshim/config.toml` or path from `PODSHIM_CONFIG_PATH`)
//! 3. Environment variables (`PODSHIM_*`)
//! 4. Command-line arguments
//!
//! Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).

use clap::Parser;
use eyre::{Report, Result as EyreResult};
use podshim::config::{AppConfig, Cli, Commands, ManifestArgs, load_config};
use podshim::engine::{
    EngineConnector, EngineContainerManager, KubeSourcesReady, SocketResolver, SourcesReady,
    runtime_from_manager,
};
use podshim::error::Result as PodshimResult;
use podshim::pod::load_pod;
use podshim::translate::{PodTranslation, translate_pod};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Installs the log subscriber, loads configuration with layered precedence,
/// then dispatches to the appropriate subcommand handler.
fn main() -> EyreResult<()> {
    init_logging();

    // Parse CLI first (for subcommand dispatch and global options).
    let cli = Cli::parse();

    // The CLI is passed to extract --config, --engine-socket, and
    // --host-userns-policy.
    let config = load_config(&cli).map_err(Report::from)?;

    run(&cli, &config).map_err(Report::from)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the CLI command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
fn run(cli: &Cli, config: &AppConfig) -> PodshimResult<()> {
    match &cli.command {
        Commands::Translate(args) => translate_manifest(config, args),
        Commands::Create(args) => create_containers(config, args),
        Commands::Ready => {
            report_ready();
            Ok(())
        }
    }
}

/// Print the runtime parameters for every container of a manifest.
fn translate_manifest(config: &AppConfig, args: &ManifestArgs) -> PodshimResult<()> {
    let pod = load_pod(&args.manifest)?;
    let report = translate_pod(&pod, config.translation.host_userns_policy);
    print_translation(&report);
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_translation(report: &PodTranslation) {
    println!("pod {}/{}", report.namespace, report.name);
    println!("host user namespace: {}", report.host_user_namespace);
    for container in &report.containers {
        println!("container {}", container.name);
        println!("  privileged: {}", container.privileged);
        for line in &container.env_lines {
            println!("  env {line}");
        }
        for bind in &container.binds {
            println!("  bind {bind}");
        }
        for advisory in &container.advisories {
            println!("  advisory: {advisory}");
        }
    }
}

/// Create every container of a manifest on the configured engine.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn create_containers(config: &AppConfig, args: &ManifestArgs) -> PodshimResult<()> {
    let pod = load_pod(&args.manifest)?;

    let env = mockable::DefaultEnv::new();
    let resolver = SocketResolver::new(&env);
    let docker = EngineConnector::connect_with_fallback(config.engine_socket.as_deref(), &resolver)?;

    let manager = EngineContainerManager::new(docker, config.translation.host_userns_policy);
    let runtime = runtime_from_manager(&manager)?;
    let tokio_runtime = EngineConnector::create_runtime()?;

    for container in &pod.spec.containers {
        let created = tokio_runtime.block_on(runtime.create_pod_container(&pod, container))?;
        println!("{} {}", created.name, created.id);
        for warning in &created.warnings {
            println!("  engine warning: {warning}");
        }
        for advisory in &created.advisories {
            println!("  advisory: {advisory}");
        }
    }
    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn report_ready() {
    let sources = KubeSourcesReady;
    println!("sources ready: {}", sources.all_ready());
}
