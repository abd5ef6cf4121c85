use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] crisiswatch_core::ValidationError),

    #[error(transparent)]
    Dashboard(#[from] crisiswatch_core::DashboardError),

    #[error(transparent)]
    Fetch(#[from] crisiswatch_core::FetchError),

    #[error("no ECOS API key: set CRISISWATCH_ECOS_API_KEY, pass --api-key, or use --mock")]
    MissingApiKey,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Dashboard(_) => 2,
            Self::MissingApiKey => 2,
            Self::Fetch(_) => 3,
            Self::Serialization(_) => 4,
        }
    }
}
