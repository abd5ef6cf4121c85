//! # Domain Models
//!
//! Canonical value types for the crisis monitor.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`IndicatorKind`] | The six tracked series |
//! | [`Granularity`] | Day or month series cadence |
//! | [`ObservationPeriod`] | The day/month a figure describes |
//! | [`Status`] | Per-indicator severity |
//! | [`CrisisLevel`] | Composite severity |
//! | [`EconomicIndicator`] | One normalized, classified observation |
//! | [`RefreshStamp`] | UTC instant of a fetch or override |
//!
//! Construction enforces invariants: an [`EconomicIndicator`] can only be
//! built through a threshold table, so its status always matches its value.

mod indicator;
mod kind;
mod level;
mod period;
mod stamp;

pub use indicator::EconomicIndicator;
pub use kind::{Granularity, IndicatorKind};
pub use level::{CrisisLevel, CrisisLevelMetadata, Status};
pub use period::{parse_iso_date, ObservationPeriod, SOURCE_OFFSET};
pub use stamp::RefreshStamp;
