//! Indicator acquisition with backward period walk.
//!
//! A fetch starts at the anchor period and, whenever the upstream call fails
//! or answers without a usable figure, steps one period back and tries again,
//! up to the kind's retry bound. Attempts within one kind are strictly
//! sequential; separate kinds run concurrently in [`IndicatorFetcher::fetch_all`].

use std::future::Future;
use std::sync::Arc;

use time::Date;

use crate::classifier::Thresholds;
use crate::domain::{EconomicIndicator, IndicatorKind, ObservationPeriod, RefreshStamp};
use crate::profile::Acquisition;
use crate::response::{parse_observation, Observation};
use crate::source::{SeriesQuery, StatisticsSource};
use crate::FetchError;

/// Outcome of a successful walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkHit<T> {
    pub value: T,
    pub period: ObservationPeriod,
    /// 1-based number of the attempt that succeeded.
    pub attempts: u32,
}

/// Try `attempt` at `anchor`, then at successively earlier periods produced
/// by `step`, for at most `bound` attempts. Returns the first hit.
pub async fn walk_back<T, F, Fut>(
    anchor: ObservationPeriod,
    bound: u32,
    step: impl Fn(ObservationPeriod) -> ObservationPeriod,
    mut attempt: F,
) -> Option<WalkHit<T>>
where
    F: FnMut(ObservationPeriod) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let mut period = anchor;
    for number in 1..=bound {
        if let Some(value) = attempt(period).await {
            return Some(WalkHit {
                value,
                period,
                attempts: number,
            });
        }
        period = step(period);
    }
    None
}

/// Per-kind fetcher over a shared statistics source.
#[derive(Clone)]
pub struct IndicatorFetcher {
    source: Arc<dyn StatisticsSource>,
    thresholds: Thresholds,
    manual_values: Vec<(IndicatorKind, f64)>,
}

impl IndicatorFetcher {
    pub fn new(source: Arc<dyn StatisticsSource>, thresholds: Thresholds) -> Self {
        Self {
            source,
            thresholds,
            manual_values: Vec::new(),
        }
    }

    /// Supply the figure for a manually-sourced kind.
    pub fn with_manual_value(mut self, kind: IndicatorKind, value: f64) -> Self {
        self.manual_values.retain(|(existing, _)| *existing != kind);
        self.manual_values.push((kind, value));
        self
    }

    pub const fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Fetch one kind, anchored at `anchor` or today in the upstream calendar.
    ///
    /// # Errors
    ///
    /// [`FetchError::NoDataInWindow`] when no attempt within the kind's retry
    /// bound produced a usable figure. Individual attempt failures are logged
    /// and never surfaced. [`FetchError::InvalidManualValue`] when a manually
    /// supplied figure is not finite.
    pub async fn fetch(
        &self,
        kind: IndicatorKind,
        anchor: Option<Date>,
    ) -> Result<EconomicIndicator, FetchError> {
        let profile = kind.profile();
        let refreshed_at = RefreshStamp::now();
        let anchor = ObservationPeriod::containing(
            profile.granularity,
            anchor.unwrap_or_else(|| refreshed_at.source_date()),
        );

        let series = match profile.acquisition {
            Acquisition::Ecos(series) => series,
            Acquisition::Manual { placeholder } => {
                let value = self
                    .manual_values
                    .iter()
                    .find(|(manual, _)| *manual == kind)
                    .map(|(_, value)| *value)
                    .unwrap_or(placeholder);
                return EconomicIndicator::new(kind, value, anchor, refreshed_at, &self.thresholds)
                    .map_err(|_| FetchError::InvalidManualValue { kind });
            }
        };

        tracing::debug!(%kind, anchor = %anchor, bound = profile.retry_bound, "fetching indicator");
        let hit = walk_back(anchor, profile.retry_bound, ObservationPeriod::step_back, |period| {
            let query = SeriesQuery::new(kind, series, period);
            async move { self.attempt(&query).await }
        })
        .await;

        let no_data = FetchError::NoDataInWindow {
            kind,
            window: profile.retry_bound,
            granularity: profile.granularity,
        };
        let Some(hit) = hit else {
            return Err(no_data);
        };

        let value = profile.convert(hit.value.raw_value);
        tracing::info!(
            %kind,
            observed_at = %hit.period,
            attempts = hit.attempts,
            value,
            "indicator fetched"
        );
        // parsing rejects non-finite figures, so conversion stays finite
        EconomicIndicator::new(kind, value, hit.period, refreshed_at, &self.thresholds)
            .map_err(|_| no_data)
    }

    /// Fetch every kind concurrently. Results come back in [`IndicatorKind::ALL`] order.
    pub async fn fetch_all(
        &self,
        anchor: Option<Date>,
    ) -> Vec<(IndicatorKind, Result<EconomicIndicator, FetchError>)> {
        let (bond, exchange, reserve, pf, stock, rp) = tokio::join!(
            self.fetch(IndicatorKind::Bond, anchor),
            self.fetch(IndicatorKind::Exchange, anchor),
            self.fetch(IndicatorKind::Reserve, anchor),
            self.fetch(IndicatorKind::Pf, anchor),
            self.fetch(IndicatorKind::Stock, anchor),
            self.fetch(IndicatorKind::Rp, anchor),
        );

        vec![
            (IndicatorKind::Bond, bond),
            (IndicatorKind::Exchange, exchange),
            (IndicatorKind::Reserve, reserve),
            (IndicatorKind::Pf, pf),
            (IndicatorKind::Stock, stock),
            (IndicatorKind::Rp, rp),
        ]
    }

    async fn attempt(&self, query: &SeriesQuery) -> Option<Observation> {
        tracing::debug!(kind = %query.kind, period = %query.period, source = self.source.id(), "querying");
        let payload = match self.source.query(query).await {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!(kind = %query.kind, period = %query.period, %error, "query failed, stepping back");
                return None;
            }
        };

        match parse_observation(&query.series, &payload) {
            Ok(observation) => Some(observation),
            Err(failure) => {
                tracing::warn!(kind = %query.kind, period = %query.period, %failure, "unusable payload, stepping back");
                None
            }
        }
    }
}
