use crisiswatch_core::{format_number, DashboardSnapshot, EconomicIndicator};

use crate::cli::OutputFormat;
use crate::commands::{Classification, Report};
use crate::error::CliError;

const GAUGE_WIDTH: usize = 20;

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => {
            for line in table_lines(report) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn table_lines(report: &Report) -> Vec<String> {
    match report {
        Report::Dashboard(snapshot) => dashboard_lines(snapshot),
        Report::Indicator(indicator) => vec![indicator_line(indicator)],
        Report::Classification(classification) => vec![classification_line(classification)],
    }
}

fn dashboard_lines(snapshot: &DashboardSnapshot) -> Vec<String> {
    let metadata = snapshot.crisis.level.metadata();
    let mut lines = vec![
        format!("level       : {} ({})", snapshot.crisis.level, metadata.label),
        format!("reason      : {}", snapshot.crisis.reason),
        format!("description : {}", metadata.description),
        String::from("indicators:"),
    ];
    lines.extend(snapshot.indicators.iter().map(|indicator| format!("  {}", indicator_line(indicator))));

    lines.push(format!("plan        : {}", snapshot.action_plan.title));
    lines.push(format!("strategy    : {}", snapshot.action_plan.asset_strategy));
    lines.extend(
        snapshot
            .action_plan
            .action_items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("  {}. {item}", index + 1)),
    );

    if !snapshot.failures.is_empty() {
        lines.push(String::from("failures:"));
        lines.extend(
            snapshot
                .failures
                .iter()
                .map(|failure| format!("  - {}: {}", failure.kind, failure.message)),
        );
    }
    lines
}

fn indicator_line(indicator: &EconomicIndicator) -> String {
    let fraction = indicator.kind().profile().gauge_fraction(indicator.value());
    format!(
        "{:<8} {:>12} {:<6} {:<8} {} observed {} ({})",
        indicator.kind().as_str(),
        format_number(indicator.value()),
        indicator.unit(),
        indicator.status().as_str(),
        gauge(fraction),
        indicator.observed_at(),
        indicator.period_label(),
    )
}

fn classification_line(classification: &Classification) -> String {
    format!(
        "{} ({}) {} {} -> {}",
        classification.name,
        classification.kind,
        format_number(classification.value),
        classification.unit,
        classification.status,
    )
}

fn gauge(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(GAUGE_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_is_fixed_width() {
        assert_eq!(gauge(0.0), format!("[{}]", ".".repeat(GAUGE_WIDTH)));
        assert_eq!(gauge(1.0), format!("[{}]", "#".repeat(GAUGE_WIDTH)));
        assert_eq!(gauge(0.5).matches('#').count(), GAUGE_WIDTH / 2);
        assert_eq!(gauge(3.0).len(), GAUGE_WIDTH + 2);
    }
}
