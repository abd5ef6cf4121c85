//! CLI argument definitions for crisiswatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `status` | Refresh every indicator and print level, plan and failures |
//! | `fetch` | Fetch a single indicator |
//! | `classify` | Classify a value without fetching |
//! | `simulate` | Refresh, override values and recompute |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Serve the offline baseline instead of ECOS |
//! | `--as-of` | today (KST) | Anchor date for the backward walk |
//! | `--api-key` | env | ECOS API key |
//! | `--pf` | env / 8.5 | PF delinquency rate |
//! | `--exchange-critical` | 1500 | Exchange-rate critical point |
//! | `--rp-critical` | 5 | RP purchase critical point |
//! | `--log-level` | `RUST_LOG` / info | Log verbosity |
//!
//! # Examples
//!
//! ```bash
//! crisiswatch status --mock --format table
//! crisiswatch fetch reserve --as-of 2025-03-04 --pretty
//! crisiswatch classify exchange 1460
//! crisiswatch simulate --mock --set exchange=1510 --set bond=4.1
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::Date;

use crisiswatch_core::{parse_iso_date, IndicatorKind};

/// Korean economic crisis monitor.
///
/// Pulls six indicators from the Bank of Korea ECOS API, classifies each one
/// and reduces them to a composite crisis level with an action plan.
#[derive(Debug, Parser)]
#[command(name = "crisiswatch", author, version, about = "Korean economic crisis monitor")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve the offline baseline figures instead of calling ECOS.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Anchor date (YYYY-MM-DD). Defaults to today in KST.
    #[arg(long, global = true, value_parser = parse_anchor)]
    pub as_of: Option<Date>,

    /// ECOS API key. Overrides CRISISWATCH_ECOS_API_KEY.
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// PF delinquency rate (%). Overrides CRISISWATCH_PF_VALUE.
    #[arg(long, global = true, value_parser = parse_finite)]
    pub pf: Option<f64>,

    /// Exchange-rate critical point (원). Overrides CRISISWATCH_EXCHANGE_CRITICAL.
    #[arg(long, global = true, value_parser = parse_finite)]
    pub exchange_critical: Option<f64>,

    /// RP purchase critical point (조원). Overrides CRISISWATCH_RP_CRITICAL.
    #[arg(long, global = true, value_parser = parse_finite)]
    pub rp_critical: Option<f64>,

    /// Log level for crisiswatch targets (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Human-readable table with gauges.
    Table,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh all indicators and report the crisis level.
    ///
    /// Exits with code 3 when any indicator could not be loaded.
    Status,

    /// Fetch one indicator.
    ///
    /// # Examples
    ///
    ///   crisiswatch fetch bond
    ///   crisiswatch fetch rp --as-of 2025-01-15
    Fetch(FetchArgs),

    /// Classify a value against the configured thresholds.
    Classify(ClassifyArgs),

    /// Refresh, apply value overrides and recompute level and plan.
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Indicator kind (bond, exchange, reserve, pf, stock, rp).
    pub kind: IndicatorKind,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Indicator kind (bond, exchange, reserve, pf, stock, rp).
    pub kind: IndicatorKind,

    /// Value in the indicator's display unit.
    #[arg(allow_hyphen_values = true, value_parser = parse_finite)]
    pub value: f64,
}

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Override as kind=value. Repeatable.
    #[arg(long = "set", value_parser = parse_override, required = true)]
    pub overrides: Vec<(IndicatorKind, f64)>,
}

fn parse_anchor(raw: &str) -> Result<Date, String> {
    parse_iso_date(raw).map_err(|error| error.to_string())
}

fn parse_finite(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("'{raw}' must be a finite number")),
        Err(_) => Err(format!("'{raw}' is not a number")),
    }
}

fn parse_override(raw: &str) -> Result<(IndicatorKind, f64), String> {
    let (kind, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("override '{raw}' must be kind=value"))?;
    let kind = IndicatorKind::parse(kind).map_err(|error| error.to_string())?;
    Ok((kind, parse_finite(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        assert_eq!(parse_override("exchange=1510"), Ok((IndicatorKind::Exchange, 1510.0)));
        assert_eq!(parse_override("stock=-2500.5"), Ok((IndicatorKind::Stock, -2500.5)));
        assert!(parse_override("exchange").is_err());
        assert!(parse_override("gold=1").is_err());
        assert!(parse_override("bond=high").is_err());
        assert!(parse_override("bond=NaN").is_err());
    }

    #[test]
    fn numeric_flags_reject_non_finite_values() {
        for flag in ["--pf", "--exchange-critical", "--rp-critical"] {
            for raw in ["NaN", "inf", "-infinity"] {
                let parsed = Cli::try_parse_from(["crisiswatch", flag, raw, "status"]);
                assert!(parsed.is_err(), "{flag} accepted {raw}");
            }
        }

        let cli = Cli::try_parse_from(["crisiswatch", "--pf", "9.2", "status"]).expect("parse");
        assert_eq!(cli.pf, Some(9.2));
    }

    #[test]
    fn parses_simulate_command() {
        let cli = Cli::try_parse_from([
            "crisiswatch",
            "--mock",
            "simulate",
            "--set",
            "bond=4.1",
            "--set",
            "rp=5",
        ])
        .expect("parse");

        assert!(cli.mock);
        match cli.command {
            Command::Simulate(args) => assert_eq!(args.overrides.len(), 2),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn classify_accepts_negative_values() {
        let cli = Cli::try_parse_from(["crisiswatch", "classify", "stock", "-1500"]).expect("parse");
        match cli.command {
            Command::Classify(args) => assert_eq!(args.value, -1500.0),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
