use serde::Serialize;

use crate::classifier::Thresholds;
use crate::domain::{IndicatorKind, ObservationPeriod, Status, RefreshStamp};
use crate::ValidationError;

/// Normalized observation of one indicator kind.
///
/// `status` is always derived from `kind` and `value` at construction; there
/// is no way to set it independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicIndicator {
    kind: IndicatorKind,
    name: &'static str,
    unit: &'static str,
    source: &'static str,
    description: &'static str,
    period_label: &'static str,
    value: f64,
    status: Status,
    observed_at: ObservationPeriod,
    refreshed_at: RefreshStamp,
}

impl EconomicIndicator {
    pub fn new(
        kind: IndicatorKind,
        value: f64,
        observed_at: ObservationPeriod,
        refreshed_at: RefreshStamp,
        thresholds: &Thresholds,
    ) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { kind });
        }

        let metadata = kind.profile().metadata;
        Ok(Self {
            kind,
            name: metadata.name,
            unit: metadata.unit,
            source: metadata.source,
            description: metadata.description,
            period_label: metadata.period_label,
            value,
            status: thresholds.classify(kind, value),
            observed_at,
            refreshed_at,
        })
    }

    /// Copy with a replaced value. Status and refresh time are re-derived,
    /// the observation period is kept.
    pub fn with_value(
        &self,
        value: f64,
        refreshed_at: RefreshStamp,
        thresholds: &Thresholds,
    ) -> Result<Self, ValidationError> {
        Self::new(self.kind, value, self.observed_at, refreshed_at, thresholds)
    }

    pub const fn kind(&self) -> IndicatorKind {
        self.kind
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn unit(&self) -> &'static str {
        self.unit
    }

    pub const fn source(&self) -> &'static str {
        self.source
    }

    pub const fn description(&self) -> &'static str {
        self.description
    }

    pub const fn period_label(&self) -> &'static str {
        self.period_label
    }

    pub const fn value(&self) -> f64 {
        self.value
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub const fn observed_at(&self) -> ObservationPeriod {
        self.observed_at
    }

    pub const fn refreshed_at(&self) -> RefreshStamp {
        self.refreshed_at
    }
}
