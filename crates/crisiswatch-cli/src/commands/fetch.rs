use std::sync::Arc;

use crisiswatch_core::{CrisisConfig, StatisticsSource};

use crate::cli::{Cli, FetchArgs};
use crate::error::CliError;

use super::{CommandResult, Report};

pub async fn run(
    args: &FetchArgs,
    cli: &Cli,
    config: &CrisisConfig,
    source: Arc<dyn StatisticsSource>,
) -> Result<CommandResult, CliError> {
    let indicator = config.fetcher(source).fetch(args.kind, cli.as_of).await?;
    Ok(CommandResult::ok(Report::Indicator(indicator)))
}
