//! # Crisiswatch Core
//!
//! Acquisition and classification core for the Korean economic crisis monitor.
//!
//! ## Overview
//!
//! This crate turns six national economic series into one composite crisis
//! level and a recommended action plan:
//!
//! - **Per-kind profiles** holding thresholds, unit conversion, granularity
//!   and the upstream query for every indicator
//! - **Fetchers** that walk the calendar backward until a usable observation
//!   turns up
//! - **A crisis level engine** reducing the indicator set through a
//!   fixed-priority rule cascade
//! - **An action plan generator** keyed on level and raw values
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`action_plan`] | Level-specific recommendations |
//! | [`adapters`] | ECOS client and offline baseline source |
//! | [`classifier`] | Per-kind status thresholds |
//! | [`config`] | Runtime configuration from env |
//! | [`dashboard`] | Refresh orchestration over an injected store |
//! | [`domain`] | Indicator kinds, periods, statuses, levels |
//! | [`engine`] | Crisis level aggregation |
//! | [`error`] | Core error types |
//! | [`fetcher`] | Backward period walk and extraction |
//! | [`http_client`] | HTTP client abstraction |
//! | [`profile`] | Per-kind configuration table |
//! | [`response`] | Typed upstream payload parsing |
//! | [`retry`] | Transport retry policy |
//! | [`source`] | Statistics source contract |
//! | [`store`] | Current indicator per kind |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crisiswatch_core::{BaselineSource, CrisisConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = CrisisConfig::from_env();
//!     let mut dashboard = config.dashboard(Arc::new(BaselineSource::default()));
//!
//!     dashboard.refresh(None).await;
//!     let crisis = dashboard.crisis();
//!     println!("{}: {}", crisis.level, crisis.reason);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Dashboard      │──────────────┐
//! └────────┬────────┘              │
//!          │                       ▼
//!          ▼               ┌──────────────────┐
//! ┌─────────────────┐      │ Engine / Planner │
//! │ IndicatorFetcher│      └──────────────────┘
//! └────────┬────────┘
//!          │ walk_back
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ StatisticsSource│────▶│ HTTP Client      │
//! │ (ECOS/baseline) │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Only two operations fail: a fetch that exhausts its window or was given
//! an unusable manual figure ([`FetchError`]) and an override on a kind that
//! was never loaded ([`DashboardError`]). Per-attempt upstream failures are logged and turned
//! into a step back.
//!
//! ```rust
//! use crisiswatch_core::FetchError;
//!
//! fn describe(error: &FetchError) -> String {
//!     match error {
//!         FetchError::NoDataInWindow { kind, window, .. } => {
//!             format!("{kind}: nothing in the last {window} periods")
//!         }
//!         FetchError::InvalidManualValue { kind } => {
//!             format!("{kind}: configured value is not a finite number")
//!         }
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The ECOS API key is read from the environment or a flag and never logged

pub mod action_plan;
pub mod adapters;
pub mod classifier;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fetcher;
pub mod format;
pub mod http_client;
pub mod profile;
pub mod response;
pub mod retry;
pub mod source;
pub mod store;

// Action plans
pub use action_plan::{generate, ActionPlan, ActionPlanGenerator, PlanTriggers};

// Adapters
pub use adapters::{BaselineSource, EcosClient, DEFAULT_BASE_URL};

// Classification
pub use classifier::{classify, Bound, Direction, StatusBands, Thresholds};

// Configuration
pub use config::{CrisisConfig, EcosConfig};

// Orchestration
pub use dashboard::{Dashboard, DashboardSnapshot, KindFailure, RefreshSummary};

// Domain models
pub use domain::{
    parse_iso_date, CrisisLevel, CrisisLevelMetadata, EconomicIndicator,
    Granularity, IndicatorKind, ObservationPeriod, RefreshStamp, Status,
};

// Aggregation
pub use engine::{aggregate, CrisisEngine, CrisisLevelResult, CrisisRules, Trigger};

// Error types
pub use error::{CoreError, DashboardError, FetchError, ParseFailure, ValidationError};

// Fetching
pub use fetcher::{walk_back, IndicatorFetcher, WalkHit};

pub use format::format_number;

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Profiles
pub use profile::{Acquisition, EcosSeries, EcosService, IndicatorMetadata, IndicatorProfile, RowSelector};

// Response parsing
pub use response::{is_usable, parse_observation, Observation};

// Retry logic
pub use retry::{Backoff, RetryConfig};

// Sources
pub use source::{SeriesQuery, SourceError, SourceErrorKind, StatisticsSource};

// Store
pub use store::IndicatorStore;
