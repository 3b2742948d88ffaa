use std::process::ExitCode;

use anyhow::{Error, Result};
use template_sync::{
    TOOL_NAME,
    config::{Config, SyncOptions},
    models::outcome::SyncReport,
    run_with_vars, telemetry,
};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    telemetry::init();

    match sync().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Template sync failed");
            eprintln!("::error::{}: {:#}", TOOL_NAME, e);
            ExitCode::FAILURE
        }
    }
}

async fn sync() -> Result<(), Error> {
    let options = SyncOptions::from_args()?;

    let report = run_with_vars(Config::environment(), &options).await?;
    log_report(&report);

    report.into_result()?;

    Ok(())
}

fn log_report(report: &SyncReport) {
    for outcome in &report.outcomes {
        info!(
            template_id = %outcome.template_id,
            name = %outcome.name,
            applied = outcome.applied,
            "{}",
            outcome.action
        );
    }

    for failure in &report.failures {
        error!(
            template_id = %failure.template_id,
            name = %failure.name,
            error = %failure.error,
            "Template not synced"
        );
    }
}
