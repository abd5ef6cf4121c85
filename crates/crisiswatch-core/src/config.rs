//! Runtime configuration.
//!
//! Defaults are compiled in. [`CrisisConfig::from_env`] overrides them from
//! `CRISISWATCH_*` environment variables; values that fail to parse are
//! logged and ignored.

use std::sync::Arc;

use crate::action_plan::{ActionPlanGenerator, PlanTriggers};
use crate::adapters::{EcosClient, DEFAULT_BASE_URL};
use crate::classifier::Thresholds;
use crate::dashboard::Dashboard;
use crate::domain::IndicatorKind;
use crate::engine::{CrisisEngine, CrisisRules};
use crate::fetcher::IndicatorFetcher;
use crate::retry::RetryConfig;
use crate::source::StatisticsSource;
use crate::store::IndicatorStore;

pub const ENV_API_KEY: &str = "CRISISWATCH_ECOS_API_KEY";
pub const ENV_BASE_URL: &str = "CRISISWATCH_ECOS_BASE_URL";
pub const ENV_EXCHANGE_CRITICAL: &str = "CRISISWATCH_EXCHANGE_CRITICAL";
pub const ENV_RP_CRITICAL: &str = "CRISISWATCH_RP_CRITICAL";
pub const ENV_RESERVE_CRITICAL: &str = "CRISISWATCH_RESERVE_CRITICAL";
pub const ENV_PF_VALUE: &str = "CRISISWATCH_PF_VALUE";

/// Upstream connection settings.
#[derive(Clone)]
pub struct EcosConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
    pub retry: RetryConfig,
}

impl std::fmt::Debug for EcosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcosConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Default for EcosConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: 5_000,
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrisisConfig {
    pub ecos: EcosConfig,
    pub thresholds: Thresholds,
    pub rules: CrisisRules,
    pub triggers: PlanTriggers,
    pub manual_pf: Option<f64>,
}

impl CrisisConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_API_KEY).filter(|key| !key.trim().is_empty()) {
            config.ecos.api_key = Some(key.trim().to_owned());
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            config.ecos.base_url = url.trim().trim_end_matches('/').to_owned();
        }
        if let Some(critical) = number(&lookup, ENV_EXCHANGE_CRITICAL) {
            config = config.with_exchange_critical(critical);
        }
        if let Some(critical) = number(&lookup, ENV_RP_CRITICAL) {
            config = config.with_rp_critical(critical);
        }
        if let Some(critical) = number(&lookup, ENV_RESERVE_CRITICAL) {
            config = config.with_reserve_critical(critical);
        }
        if let Some(value) = number(&lookup, ENV_PF_VALUE) {
            config.manual_pf = Some(value);
        }

        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.ecos.api_key = Some(api_key.into());
        self
    }

    /// Move the exchange-rate critical point everywhere it is consulted.
    pub fn with_exchange_critical(mut self, critical: f64) -> Self {
        self.thresholds = self.thresholds.with_exchange_critical(critical);
        self.rules.exchange_critical = critical;
        self.triggers.critical_exchange = critical;
        self
    }

    /// Move the RP critical point everywhere it is consulted.
    pub fn with_rp_critical(mut self, critical: f64) -> Self {
        self.thresholds = self.thresholds.with_rp_critical(critical);
        self.rules.rp_critical = critical;
        self.triggers.critical_rp = critical;
        self
    }

    /// Move the reserve floor below which the composite level is CRITICAL.
    pub fn with_reserve_critical(mut self, critical: f64) -> Self {
        self.rules.reserve_critical = critical;
        self
    }

    pub fn with_manual_pf(mut self, value: f64) -> Self {
        self.manual_pf = Some(value);
        self
    }

    /// ECOS client for the configured key, if one is set.
    pub fn ecos_client(&self) -> Option<EcosClient> {
        let key = self.ecos.api_key.as_ref()?;
        Some(
            EcosClient::with_reqwest(key.clone())
                .with_base_url(self.ecos.base_url.clone())
                .with_timeout_ms(self.ecos.timeout_ms)
                .with_retry(self.ecos.retry.clone()),
        )
    }

    pub fn fetcher(&self, source: Arc<dyn StatisticsSource>) -> IndicatorFetcher {
        let fetcher = IndicatorFetcher::new(source, self.thresholds.clone());
        match self.manual_pf {
            Some(value) => fetcher.with_manual_value(IndicatorKind::Pf, value),
            None => fetcher,
        }
    }

    /// Dashboard over `source` with an empty store.
    pub fn dashboard(&self, source: Arc<dyn StatisticsSource>) -> Dashboard {
        Dashboard::new(self.fetcher(source), IndicatorStore::new())
            .with_engine(CrisisEngine::new(self.rules))
            .with_planner(ActionPlanGenerator::new(self.triggers))
    }
}

fn number(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<f64> {
    let raw = lookup(name)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(variable = name, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
