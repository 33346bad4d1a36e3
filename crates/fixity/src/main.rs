mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fixity_checker::{Checker, RunSummary};
use fixity_inventory::GrpcInventory;
use fixity_storage::VfsStorage;
use tracing::{info, warn};

use crate::cli::{Cli, Format};

/// Exit code after Ctrl-C, as a shell reports SIGINT.
const INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config()?;
    logging::init(&config.logging)?;

    let options = config.run.run_options()?;
    let endpoint = config.handler.endpoint();
    info!(
        service = %config.handler.service_name,
        %endpoint,
        concurrency = options.concurrency,
        algorithm = %options.algorithm,
        "starting fixity checker"
    );

    let inventory = GrpcInventory::connect(endpoint.clone(), config.run.connect_timeout())
        .await
        .with_context(|| {
            format!(
                "cannot reach inventory service '{}' at {endpoint}",
                config.handler.service_name
            )
        })?;
    let storage = VfsStorage::default();
    let checker = Checker::new(&inventory, &storage, &options);

    let summary = tokio::select! {
        summary = checker.run() => summary,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            warn!("interrupted, run aborted before completion");
            return Ok(ExitCode::from(INTERRUPTED));
        }
    };

    if !summary.is_clean() {
        warn!(
            failed = summary.failed,
            skipped = summary.skipped,
            report_failures = summary.report_failures,
            enumeration_failed = summary.enumeration_failed,
            "run finished with problems"
        );
    }
    print_summary(&summary, cli.format)?;
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &RunSummary, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Text => println!("{summary}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(summary)?),
    }
    Ok(())
}
