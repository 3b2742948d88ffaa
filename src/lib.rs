pub mod clients;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod reconciler;
pub mod telemetry;

use tracing::info;

use crate::{
    clients::sendgrid::SendGridClient,
    config::{Config, SyncOptions},
    error::SyncError,
    loader::load_templates,
    models::outcome::SyncReport,
    reconciler::sync_templates,
};

pub const TOOL_NAME: &str = "template-sync";

/// Loads the manifest for the requested environment and reconciles every
/// template in it against SendGrid.
///
/// Configuration and file errors abort before any remote call. Remote
/// failures are gathered per template and returned in the report.
/// Builds the configuration from `vars` and runs the sync, so a missing
/// environment value fails before any template is touched.
pub async fn run_with_vars<I>(vars: I, options: &SyncOptions) -> Result<SyncReport, SyncError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let config = Config::from_iter(vars)?;

    run(&config, options).await
}

pub async fn run(config: &Config, options: &SyncOptions) -> Result<SyncReport, SyncError> {
    let manifest = options.manifest()?;
    let environment = options.environment()?;

    let descriptors = load_templates(&config.workspace_path(), manifest, environment).await?;

    info!(
        environment,
        templates = descriptors.len(),
        dry_run = options.dry_run,
        "Starting template sync"
    );

    let client = SendGridClient::new(config)?;

    Ok(sync_templates(&client, &descriptors, options.dry_run).await)
}
