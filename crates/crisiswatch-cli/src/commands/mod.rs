mod classify;
mod fetch;
mod simulate;
mod status;

use std::sync::Arc;

use serde::Serialize;

use crisiswatch_core::{
    BaselineSource, CrisisConfig, DashboardSnapshot, EconomicIndicator, IndicatorKind,
    StatisticsSource, Status,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// What a command produced.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Dashboard(DashboardSnapshot),
    Indicator(EconomicIndicator),
    Classification(Classification),
}

#[derive(Debug, Serialize)]
pub struct Classification {
    pub kind: IndicatorKind,
    pub name: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub status: Status,
}

pub struct CommandResult {
    pub report: Report,
    /// Kinds that could not be loaded.
    pub failures: usize,
}

impl CommandResult {
    pub fn ok(report: Report) -> Self {
        Self { report, failures: 0 }
    }

    pub fn with_failures(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = configure(cli);

    match &cli.command {
        Command::Classify(args) => classify::run(args, &config),
        Command::Status => status::run(cli, &config, source(cli, &config)?).await,
        Command::Fetch(args) => fetch::run(args, cli, &config, source(cli, &config)?).await,
        Command::Simulate(args) => simulate::run(args, cli, &config, source(cli, &config)?).await,
    }
}

/// Environment first, then flags.
fn configure(cli: &Cli) -> CrisisConfig {
    let mut config = CrisisConfig::from_env();
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    if let Some(critical) = cli.exchange_critical {
        config = config.with_exchange_critical(critical);
    }
    if let Some(critical) = cli.rp_critical {
        config = config.with_rp_critical(critical);
    }
    if let Some(value) = cli.pf {
        config = config.with_manual_pf(value);
    }
    config
}

fn source(cli: &Cli, config: &CrisisConfig) -> Result<Arc<dyn StatisticsSource>, CliError> {
    if cli.mock {
        return Ok(Arc::new(BaselineSource::default()));
    }
    let client = config.ecos_client().ok_or(CliError::MissingApiKey)?;
    Ok(Arc::new(client))
}
