use thiserror::Error;

use crate::domain::{Granularity, IndicatorKind};

/// Validation and contract errors exposed by `crisiswatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown indicator kind '{value}', expected one of bond, exchange, reserve, pf, stock, rp")]
    UnknownKind { value: String },
    #[error("unknown crisis level '{value}', expected one of STABLE, CONCERN, CAUTION, CRITICAL")]
    UnknownLevel { value: String },

    #[error("period '{value}' must be YYYYMMDD (day) or YYYYMM (month)")]
    InvalidPeriod { value: String },
    #[error("date '{value}' must be YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("value for '{kind}' must be finite")]
    NonFiniteValue { kind: IndicatorKind },
}

/// Why a raw upstream payload cannot yield an observation.
///
/// The fetcher treats every variant the same way (step one period back);
/// the distinction only exists for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("payload is not valid JSON: {reason}")]
    Malformed { reason: String },
    #[error("upstream answered {code}: {message}")]
    UpstreamMessage { code: String, message: String },
    #[error("payload has no '{table}' table")]
    MissingTable { table: &'static str },
    #[error("payload has no observation rows")]
    NoRows,
    #[error("payload has no row at index {index}")]
    RowMissing { index: usize },
    #[error("observation value is empty")]
    EmptyValue,
    #[error("observation value '{raw}' is not numeric")]
    NotNumeric { raw: String },
    #[error("observation value '{raw}' is not finite")]
    NonFinite { raw: String },
}

/// Terminal failure of an indicator fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("no usable {kind} observation within {window} {granularity} period(s)")]
    NoDataInWindow {
        kind: IndicatorKind,
        window: u32,
        granularity: Granularity,
    },
    #[error("configured {kind} value is not a finite number")]
    InvalidManualValue { kind: IndicatorKind },
}

impl FetchError {
    pub const fn kind(&self) -> IndicatorKind {
        match self {
            Self::NoDataInWindow { kind, .. } | Self::InvalidManualValue { kind } => *kind,
        }
    }
}

/// Errors raised by the dashboard's explicit entry points.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("indicator '{kind}' has not been loaded yet")]
    NotLoaded { kind: IndicatorKind },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
