//! Dashboard orchestration.
//!
//! [`Dashboard`] runs every fetcher on refresh, writes successes into the
//! injected [`IndicatorStore`], records per-kind failures and derives the
//! crisis level and action plan from whatever the store currently holds.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;
use tokio::sync::watch;

use crate::action_plan::{ActionPlan, ActionPlanGenerator};
use crate::domain::{EconomicIndicator, IndicatorKind, RefreshStamp};
use crate::engine::{CrisisEngine, CrisisLevelResult};
use crate::fetcher::IndicatorFetcher;
use crate::store::IndicatorStore;
use crate::{DashboardError, FetchError};

/// A failed kind and its rendered error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindFailure {
    pub kind: IndicatorKind,
    pub message: String,
}

/// Point-in-time view of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub indicators: Vec<EconomicIndicator>,
    pub crisis: CrisisLevelResult,
    pub action_plan: ActionPlan,
    pub failures: Vec<KindFailure>,
    pub loading: bool,
}

/// Counts from one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub loaded: usize,
    pub failed: usize,
}

/// Raises the loading flag for its lifetime.
///
/// Dropping the guard lowers the flag, including when a refresh future is
/// cancelled mid-flight.
struct LoadingGuard<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

pub struct Dashboard {
    fetcher: IndicatorFetcher,
    store: IndicatorStore,
    engine: CrisisEngine,
    planner: ActionPlanGenerator,
    errors: BTreeMap<IndicatorKind, FetchError>,
    loading: watch::Sender<bool>,
}

impl Dashboard {
    pub fn new(fetcher: IndicatorFetcher, store: IndicatorStore) -> Self {
        Self {
            fetcher,
            store,
            engine: CrisisEngine::default(),
            planner: ActionPlanGenerator::default(),
            errors: BTreeMap::new(),
            loading: watch::channel(false).0,
        }
    }

    pub fn with_engine(mut self, engine: CrisisEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_planner(mut self, planner: ActionPlanGenerator) -> Self {
        self.planner = planner;
        self
    }

    pub const fn store(&self) -> &IndicatorStore {
        &self.store
    }

    pub fn into_store(self) -> IndicatorStore {
        self.store
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Receiver that observes the loading flag while a refresh holds the dashboard.
    pub fn loading_updates(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Fetch every kind concurrently and record the outcomes.
    ///
    /// A failed kind keeps whatever record it had before and gets its error
    /// recorded; a successful kind replaces its record and clears its error.
    pub async fn refresh(&mut self, anchor: Option<Date>) -> RefreshSummary {
        let _loading = LoadingGuard::raise(&self.loading);
        let outcomes = self.fetcher.fetch_all(anchor).await;

        let mut summary = RefreshSummary { loaded: 0, failed: 0 };
        for (kind, outcome) in outcomes {
            match outcome {
                Ok(indicator) => {
                    self.store.put(indicator);
                    self.errors.remove(&kind);
                    summary.loaded += 1;
                }
                Err(error) => {
                    tracing::warn!(%kind, %error, "indicator unavailable");
                    self.errors.insert(kind, error);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(loaded = summary.loaded, failed = summary.failed, "refresh complete");
        summary
    }

    /// Fetch a single kind and record the outcome.
    pub async fn refresh_kind(
        &mut self,
        kind: IndicatorKind,
        anchor: Option<Date>,
    ) -> Result<&EconomicIndicator, FetchError> {
        let outcome = {
            let _loading = LoadingGuard::raise(&self.loading);
            self.fetcher.fetch(kind, anchor).await
        };

        match outcome {
            Ok(indicator) => {
                self.errors.remove(&kind);
                self.store.put(indicator);
                self.store
                    .get(kind)
                    .ok_or(FetchError::NoDataInWindow {
                        kind,
                        window: kind.profile().retry_bound,
                        granularity: kind.profile().granularity,
                    })
            }
            Err(error) => {
                tracing::warn!(%kind, %error, "indicator unavailable");
                self.errors.insert(kind, error.clone());
                Err(error)
            }
        }
    }

    /// Replace the value of an already-loaded kind.
    ///
    /// Status and refresh time are re-derived; the observation period is kept.
    ///
    /// # Errors
    ///
    /// [`DashboardError::NotLoaded`] when the kind has no record yet, or a
    /// validation error for a non-finite value.
    pub fn set_value(
        &mut self,
        kind: IndicatorKind,
        value: f64,
    ) -> Result<&EconomicIndicator, DashboardError> {
        let current = self.store.get(kind).ok_or(DashboardError::NotLoaded { kind })?;
        let updated = current.with_value(value, RefreshStamp::now(), self.fetcher.thresholds())?;
        tracing::debug!(%kind, value, status = %updated.status(), "indicator overridden");

        self.store.put(updated);
        self.store.get(kind).ok_or(DashboardError::NotLoaded { kind })
    }

    pub fn crisis(&self) -> CrisisLevelResult {
        self.engine.aggregate(&self.store.snapshot())
    }

    pub fn action_plan(&self) -> ActionPlan {
        let indicators = self.store.snapshot();
        let crisis = self.engine.aggregate(&indicators);
        self.planner.generate(crisis.level, &indicators)
    }

    pub fn error_for(&self, kind: IndicatorKind) -> Option<&FetchError> {
        self.errors.get(&kind)
    }

    /// All recorded failures joined into one message, if any.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let joined = self
            .errors
            .values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let indicators = self.store.snapshot();
        let crisis = self.engine.aggregate(&indicators);
        let action_plan = self.planner.generate(crisis.level, &indicators);
        let failures = self
            .errors
            .iter()
            .map(|(kind, error)| KindFailure {
                kind: *kind,
                message: error.to_string(),
            })
            .collect();

        DashboardSnapshot {
            indicators,
            crisis,
            action_plan,
            failures,
            loading: self.is_loading(),
        }
    }
}
