use std::sync::Arc;

use crisiswatch_core::{CrisisConfig, StatisticsSource};

use crate::cli::Cli;
use crate::error::CliError;

use super::{CommandResult, Report};

pub async fn run(
    cli: &Cli,
    config: &CrisisConfig,
    source: Arc<dyn StatisticsSource>,
) -> Result<CommandResult, CliError> {
    let mut dashboard = config.dashboard(source);
    let summary = dashboard.refresh(cli.as_of).await;

    Ok(CommandResult::ok(Report::Dashboard(dashboard.snapshot())).with_failures(summary.failed))
}
