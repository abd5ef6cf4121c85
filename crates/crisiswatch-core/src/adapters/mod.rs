//! Statistics source adapters.
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`EcosClient`] | Bank of Korea ECOS open API over HTTP |
//! | [`BaselineSource`] | Offline baseline figures in ECOS payload shape |

mod baseline;
mod ecos;

pub use baseline::BaselineSource;
pub use ecos::{EcosClient, DEFAULT_BASE_URL};
