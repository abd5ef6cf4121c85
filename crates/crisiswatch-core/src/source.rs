//! Upstream statistics source contract.
//!
//! A [`StatisticsSource`] answers one single-period query with a raw JSON
//! payload. It knows nothing about validity; deciding whether the payload is
//! usable is the job of [`crate::response`].

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::domain::{IndicatorKind, ObservationPeriod};
use crate::profile::EcosSeries;

/// One single-point lookup (start period equals end period).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub kind: IndicatorKind,
    pub series: EcosSeries,
    pub period: ObservationPeriod,
}

impl SeriesQuery {
    pub const fn new(kind: IndicatorKind, series: EcosSeries, period: ObservationPeriod) -> Self {
        Self {
            kind,
            series,
            period,
        }
    }
}

/// Transport/upstream error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    Unavailable,
    RateLimited,
    InvalidRequest,
    Internal,
}

impl SourceErrorKind {
    /// Whether the same query may succeed if repeated later.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Unavailable | Self::RateLimited)
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Unavailable => "upstream.unavailable",
            Self::RateLimited => "upstream.rate_limited",
            Self::InvalidRequest => "upstream.invalid_request",
            Self::Internal => "upstream.internal",
        }
    }
}

/// Failure of a single upstream query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    fn of(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::Unavailable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::RateLimited, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::of(SourceErrorKind::Internal, message)
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.kind.is_transient()
    }

    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

impl std::error::Error for SourceError {}

/// Upstream adapter contract.
///
/// Implementations must be `Send + Sync`; the fetcher shares one source
/// across all concurrently running kinds.
pub trait StatisticsSource: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &'static str;

    /// Request the observation for exactly `query.period`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the call itself fails. An answer that
    /// merely contains no data is `Ok`.
    fn query<'a>(
        &'a self,
        query: &'a SeriesQuery,
    ) -> Pin<Box<dyn Future<Output = Result<Value, SourceError>> + Send + 'a>>;
}
