//! Threshold-based status classification.
//!
//! Every kind declares its own bands. Direction differs per kind (bond,
//! exchange, pf and rp worsen upward; reserve and stock worsen downward) and
//! so does boundary inclusion: reserve alone uses strict `<` on both bands.

use serde::{Deserialize, Serialize};

use crate::domain::{IndicatorKind, Status};

/// Which way a series moves when conditions deteriorate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsWorse,
    LowerIsWorse,
}

/// A single comparison against a threshold value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Bound {
    /// `value >= threshold`
    AtLeast(f64),
    /// `value <= threshold`
    AtMost(f64),
    /// `value < threshold`
    Below(f64),
}

impl Bound {
    pub fn matches(self, value: f64) -> bool {
        match self {
            Self::AtLeast(threshold) => value >= threshold,
            Self::AtMost(threshold) => value <= threshold,
            Self::Below(threshold) => value < threshold,
        }
    }

    pub const fn threshold(self) -> f64 {
        match self {
            Self::AtLeast(threshold) | Self::AtMost(threshold) | Self::Below(threshold) => {
                threshold
            }
        }
    }

    /// Same comparison against a different threshold.
    pub const fn with_threshold(self, threshold: f64) -> Self {
        match self {
            Self::AtLeast(_) => Self::AtLeast(threshold),
            Self::AtMost(_) => Self::AtMost(threshold),
            Self::Below(_) => Self::Below(threshold),
        }
    }
}

/// DANGER and optional WARNING bands for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusBands {
    pub danger: Bound,
    pub warning: Option<Bound>,
}

impl StatusBands {
    pub const fn new(danger: Bound, warning: Option<Bound>) -> Self {
        Self { danger, warning }
    }

    pub fn classify(self, value: f64) -> Status {
        if self.danger.matches(value) {
            return Status::Danger;
        }
        match self.warning {
            Some(warning) if warning.matches(value) => Status::Warning,
            _ => Status::Safe,
        }
    }
}

/// Runtime threshold table, seeded from each kind's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub bond: StatusBands,
    pub exchange: StatusBands,
    pub reserve: StatusBands,
    pub pf: StatusBands,
    pub stock: StatusBands,
    pub rp: StatusBands,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            bond: IndicatorKind::Bond.profile().bands,
            exchange: IndicatorKind::Exchange.profile().bands,
            reserve: IndicatorKind::Reserve.profile().bands,
            pf: IndicatorKind::Pf.profile().bands,
            stock: IndicatorKind::Stock.profile().bands,
            rp: IndicatorKind::Rp.profile().bands,
        }
    }
}

impl Thresholds {
    pub const fn bands(&self, kind: IndicatorKind) -> StatusBands {
        match kind {
            IndicatorKind::Bond => self.bond,
            IndicatorKind::Exchange => self.exchange,
            IndicatorKind::Reserve => self.reserve,
            IndicatorKind::Pf => self.pf,
            IndicatorKind::Stock => self.stock,
            IndicatorKind::Rp => self.rp,
        }
    }

    /// Move the exchange-rate DANGER boundary to a new critical point.
    pub fn with_exchange_critical(mut self, critical: f64) -> Self {
        self.exchange.danger = self.exchange.danger.with_threshold(critical);
        self
    }

    /// Move the RP DANGER boundary to a new critical point.
    pub fn with_rp_critical(mut self, critical: f64) -> Self {
        self.rp.danger = self.rp.danger.with_threshold(critical);
        self
    }

    pub fn classify(&self, kind: IndicatorKind, value: f64) -> Status {
        self.bands(kind).classify(value)
    }
}

/// Classify with the compiled-in thresholds.
pub fn classify(kind: IndicatorKind, value: f64) -> Status {
    IndicatorKind::profile(kind).bands.classify(value)
}
