use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Per-indicator severity. Ordered `Safe < Warning < Danger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Safe,
    Warning,
    Danger,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite severity across the whole indicator set.
///
/// Ordered `Stable < Concern < Caution < Critical`; independent of [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrisisLevel {
    Stable,
    Concern,
    Caution,
    Critical,
}

/// Display metadata attached to each crisis level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrisisLevelMetadata {
    pub label: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl CrisisLevel {
    pub const ALL: [Self; 4] = [Self::Stable, Self::Concern, Self::Caution, Self::Critical];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "STABLE",
            Self::Concern => "CONCERN",
            Self::Caution => "CAUTION",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| ValidationError::UnknownLevel {
                value: input.to_owned(),
            })
    }

    pub const fn metadata(self) -> CrisisLevelMetadata {
        match self {
            Self::Stable => CrisisLevelMetadata {
                label: "양호",
                color: "#22c55e",
                description: "경제 지표가 안정적인 상태입니다.",
            },
            Self::Concern => CrisisLevelMetadata {
                label: "관심",
                color: "#eab308",
                description: "일부 지표에서 주의가 필요한 상황입니다.",
            },
            Self::Caution => CrisisLevelMetadata {
                label: "주의",
                color: "#f97316",
                description: "경제 위기 징후가 가시화되고 있습니다.",
            },
            Self::Critical => CrisisLevelMetadata {
                label: "위험",
                color: "#ef4444",
                description: "경제 시스템 붕괴 직전의 위험 상태입니다.",
            },
        }
    }
}

impl Display for CrisisLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrisisLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
