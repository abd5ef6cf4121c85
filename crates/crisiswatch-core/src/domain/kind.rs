use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Closed set of tracked statistical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    /// 10-year treasury bond yield (%).
    Bond,
    /// KRW/USD exchange rate.
    Exchange,
    /// Foreign exchange reserves (억 달러).
    Reserve,
    /// Project-financing loan delinquency rate (%).
    Pf,
    /// Foreign net equity flow (억원).
    Stock,
    /// Central bank repo purchase volume (조원).
    Rp,
}

impl IndicatorKind {
    pub const ALL: [Self; 6] = [
        Self::Bond,
        Self::Exchange,
        Self::Reserve,
        Self::Pf,
        Self::Stock,
        Self::Rp,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bond => "bond",
            Self::Exchange => "exchange",
            Self::Reserve => "reserve",
            Self::Pf => "pf",
            Self::Stock => "stock",
            Self::Rp => "rp",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownKind {
                value: input.to_owned(),
            })
    }
}

impl Display for IndicatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Native time granularity of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }

    /// Upstream cycle code.
    pub const fn cycle(self) -> &'static str {
        match self {
            Self::Day => "D",
            Self::Month => "M",
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
