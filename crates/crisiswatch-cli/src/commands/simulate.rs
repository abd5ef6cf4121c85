use std::sync::Arc;

use crisiswatch_core::{CrisisConfig, StatisticsSource};

use crate::cli::{Cli, SimulateArgs};
use crate::error::CliError;

use super::{CommandResult, Report};

pub async fn run(
    args: &SimulateArgs,
    cli: &Cli,
    config: &CrisisConfig,
    source: Arc<dyn StatisticsSource>,
) -> Result<CommandResult, CliError> {
    let mut dashboard = config.dashboard(source);
    let summary = dashboard.refresh(cli.as_of).await;

    for (kind, value) in &args.overrides {
        let updated = dashboard.set_value(*kind, *value)?;
        tracing::info!(%kind, value, status = %updated.status(), "override applied");
    }

    Ok(CommandResult::ok(Report::Dashboard(dashboard.snapshot())).with_failures(summary.failed))
}
