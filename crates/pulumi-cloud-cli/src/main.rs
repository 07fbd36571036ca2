// crates/pulumi-cloud-cli/src/main.rs
// ============================================================================
// Module: Pulumi Cloud CLI Entry Point
// Description: Command dispatcher for config checks, sync, and provisioning.
// Purpose: Drive the Pulumi Cloud connector from the command line.
// Dependencies: clap, governance-sdk, pulumi-cloud-config, pulumi-cloud-connector, tracing
// ============================================================================

//! ## Overview
//! The CLI loads connector configuration, builds the Pulumi Cloud connector,
//! and runs one operation per invocation. Results go to stdout as JSON so they
//! can be piped; diagnostics go to stderr through `tracing`.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use governance_sdk::Connector;
use governance_sdk::Grant;
use governance_sdk::Resource;
use governance_sdk::ResourceId;
use governance_sdk::ResourceSyncer;
use governance_sdk::collect_snapshot;
use governance_sdk::lookup::find_entitlement;
use governance_sdk::lookup::find_grant;
use governance_sdk::lookup::locate_resource;
use pulumi_cloud_config::ConnectorConfig;
use pulumi_cloud_connector::PulumiConnector;
use pulumi_cloud_connector::USER;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "PULUMI_CLOUD_LOG";
/// Filter applied when [`LOG_ENV`] is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "pulumi-cloud-connector",
    version,
    about = "Pulumi Cloud identity-governance connector",
    disable_help_subcommand = true
)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Check credentials against Pulumi Cloud.
    Validate(ConfigArgs),
    /// Print every resource, entitlement, and grant as JSON.
    Sync(ConfigArgs),
    /// Grant an entitlement to a user.
    Grant(ProvisionArgs),
    /// Revoke an entitlement held by a user.
    Revoke(ProvisionArgs),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a connector configuration file without contacting Pulumi Cloud.
    Validate(ConfigArgs),
}

/// Configuration file selection shared by every command.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Optional config file path (defaults to pulumi-cloud.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `grant` and `revoke`.
#[derive(Args, Debug)]
struct ProvisionArgs {
    /// Configuration file selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Resource type offering the entitlement (`organization` or `team`).
    #[arg(long = "resource-type", value_name = "TYPE")]
    resource_type: String,
    /// Provider key of the resource (organization name or team name).
    #[arg(long, value_name = "ID")]
    resource: String,
    /// Entitlement slug (`member` or `admin`).
    #[arg(long, value_name = "SLUG")]
    entitlement: String,
    /// Login of the user receiving or losing the entitlement.
    #[arg(long, value_name = "LOGIN")]
    principal: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Commands::Config {
            command: ConfigCommand::Validate(args),
        } => command_config_validate(&args),
        Commands::Validate(args) => command_validate(&args),
        Commands::Sync(args) => command_sync(&args),
        Commands::Grant(args) => command_grant(&args),
        Commands::Revoke(args) => command_revoke(&args),
    }
}

/// Installs the stderr log subscriber.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    write_stdout_line(&format!("config ok for organization {}", config.org_name))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `validate`.
fn command_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let connector = build_connector(args.config.as_deref())?;
    connector.validate().map_err(|err| CliError::new(err.to_string()))?;
    write_stdout_line(&format!("credentials ok for organization {}", connector.org_name()))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `sync`.
fn command_sync(args: &ConfigArgs) -> CliResult<ExitCode> {
    let connector = build_connector(args.config.as_deref())?;
    write_stdout_line(&sync_json(&connector)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `grant`.
fn command_grant(args: &ProvisionArgs) -> CliResult<ExitCode> {
    let connector = build_connector(args.config.config.as_deref())?;
    let grants = apply_grant(&connector, args)?;
    write_stdout_line(&to_pretty_json(&grants)?)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `revoke`.
fn command_revoke(args: &ProvisionArgs) -> CliResult<ExitCode> {
    let connector = build_connector(args.config.config.as_deref())?;
    let grant = apply_revoke(&connector, args)?;
    write_stdout_line(&to_pretty_json(&grant)?)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Loads and validates connector configuration.
fn load_config(path: Option<&Path>) -> CliResult<ConnectorConfig> {
    ConnectorConfig::load(path).map_err(|err| CliError::new(err.to_string()))
}

/// Builds a connector from configuration at `path`.
fn build_connector(path: Option<&Path>) -> CliResult<PulumiConnector> {
    let config = load_config(path)?;
    PulumiConnector::from_config(&config).map_err(|err| CliError::new(err.to_string()))
}

/// Collects a snapshot and renders it as pretty JSON.
fn sync_json(connector: &dyn Connector) -> CliResult<String> {
    let snapshot = collect_snapshot(connector).map_err(|err| CliError::new(err.to_string()))?;
    info!(
        resources = snapshot.resources.len(),
        entitlements = snapshot.entitlements.len(),
        grants = snapshot.grants.len(),
        "sync complete"
    );
    to_pretty_json(&snapshot)
}

/// Grants the selected entitlement to the selected user.
fn apply_grant(connector: &dyn Connector, args: &ProvisionArgs) -> CliResult<Vec<Grant>> {
    let syncer = find_syncer(connector, &args.resource_type)?;
    let provisioner =
        syncer.provisioner().ok_or_else(|| not_provisionable(&args.resource_type))?;
    let resource = locate_resource(syncer.as_ref(), None, &args.resource)
        .map_err(|err| CliError::new(err.to_string()))?;
    let entitlement = find_entitlement(syncer.as_ref(), &resource, &args.entitlement)
        .map_err(|err| CliError::new(err.to_string()))?;
    let principal = Resource::reference(ResourceId::new(&USER, args.principal.as_str()));
    provisioner.grant(&principal, &entitlement).map_err(|err| CliError::new(err.to_string()))
}

/// Revokes the live grant of the selected entitlement held by the selected user.
fn apply_revoke(connector: &dyn Connector, args: &ProvisionArgs) -> CliResult<Grant> {
    let syncer = find_syncer(connector, &args.resource_type)?;
    let provisioner =
        syncer.provisioner().ok_or_else(|| not_provisionable(&args.resource_type))?;
    let resource = locate_resource(syncer.as_ref(), None, &args.resource)
        .map_err(|err| CliError::new(err.to_string()))?;
    let principal = ResourceId::new(&USER, args.principal.as_str());
    let grant = find_grant(syncer.as_ref(), &resource, &principal, &args.entitlement)
        .map_err(|err| CliError::new(err.to_string()))?;
    provisioner.revoke(&grant).map_err(|err| CliError::new(err.to_string()))?;
    Ok(grant)
}

/// Returns the syncer handling `resource_type`.
fn find_syncer(
    connector: &dyn Connector,
    resource_type: &str,
) -> CliResult<Box<dyn ResourceSyncer>> {
    let syncers = connector.resource_syncers();
    let known =
        syncers.iter().map(|syncer| syncer.resource_type().id).collect::<Vec<_>>().join(", ");
    syncers
        .into_iter()
        .find(|syncer| syncer.resource_type().id == resource_type)
        .ok_or_else(|| {
            CliError::new(format!(
                "unknown resource type {resource_type} (expected one of: {known})"
            ))
        })
}

/// Error for resource types without grant and revoke support.
fn not_provisionable(resource_type: &str) -> CliError {
    CliError::new(format!("resource type {resource_type} does not support grant or revoke"))
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Renders a serializable value as pretty JSON.
fn to_pretty_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to encode output: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("failed to write to stdout: {err}")))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
