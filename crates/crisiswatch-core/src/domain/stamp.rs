use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::domain::SOURCE_OFFSET;

/// Instant a record was fetched or last overridden, held in UTC.
///
/// Serialized as RFC3339 with a `Z` suffix. The day it falls on in the
/// upstream's calendar is the default anchor of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshStamp(OffsetDateTime);

impl RefreshStamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Calendar date of this instant in the upstream's timezone.
    pub fn source_date(self) -> Date {
        self.0.to_offset(SOURCE_OFFSET).date()
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }

    #[cfg(test)]
    pub(crate) fn at_unix(seconds: i64) -> Self {
        Self(OffsetDateTime::from_unix_timestamp(seconds).expect("unix time in range"))
    }
}

impl Display for RefreshStamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for RefreshStamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn formats_with_z_suffix() {
        let stamp = RefreshStamp::at_unix(1_741_050_000);
        assert_eq!(stamp.to_string(), "2025-03-04T01:00:00Z");
    }

    #[test]
    fn source_date_rolls_over_at_kst_midnight() {
        // 15:30 UTC is 00:30 the next day in Seoul
        let late = RefreshStamp::at_unix(1_741_102_200);
        assert_eq!(late.source_date(), date!(2025 - 03 - 05));

        let morning = RefreshStamp::at_unix(1_741_050_000);
        assert_eq!(morning.source_date(), date!(2025 - 03 - 04));
    }
}
