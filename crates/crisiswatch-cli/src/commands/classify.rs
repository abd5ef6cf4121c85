use crisiswatch_core::{CrisisConfig, ValidationError};

use crate::cli::ClassifyArgs;
use crate::error::CliError;

use super::{Classification, CommandResult, Report};

pub fn run(args: &ClassifyArgs, config: &CrisisConfig) -> Result<CommandResult, CliError> {
    if !args.value.is_finite() {
        return Err(ValidationError::NonFiniteValue { kind: args.kind }.into());
    }

    let metadata = args.kind.profile().metadata;
    Ok(CommandResult::ok(Report::Classification(Classification {
        kind: args.kind,
        name: metadata.name,
        unit: metadata.unit,
        value: args.value,
        status: config.thresholds.classify(args.kind, args.value),
    })))
}
