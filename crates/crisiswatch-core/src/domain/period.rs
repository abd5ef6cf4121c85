use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::{format_description, offset};
use time::{Date, Month, UtcOffset};

use crate::domain::Granularity;
use crate::ValidationError;

/// Calendar offset of the upstream statistics source.
pub const SOURCE_OFFSET: UtcOffset = offset!(+9);

/// Parse a `YYYY-MM-DD` date, as accepted on the command line.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(input.trim(), &format).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// A single day or a single month in the upstream's native granularity.
///
/// Month periods are normalized to the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObservationPeriod {
    Day(Date),
    Month(Date),
}

impl ObservationPeriod {
    /// The period containing `date` at the given granularity.
    pub fn containing(granularity: Granularity, date: Date) -> Self {
        match granularity {
            Granularity::Day => Self::Day(date),
            Granularity::Month => Self::Month(first_of_month(date)),
        }
    }

    pub const fn granularity(self) -> Granularity {
        match self {
            Self::Day(_) => Granularity::Day,
            Self::Month(_) => Granularity::Month,
        }
    }

    pub const fn date(self) -> Date {
        match self {
            Self::Day(date) | Self::Month(date) => date,
        }
    }

    /// One unit earlier. Saturates at the earliest representable date.
    pub fn step_back(self) -> Self {
        match self {
            Self::Day(date) => Self::Day(date.previous_day().unwrap_or(date)),
            Self::Month(date) => {
                let last_of_previous = date.previous_day().unwrap_or(date);
                Self::Month(first_of_month(last_of_previous))
            }
        }
    }

    /// Upstream period code: `YYYYMMDD` for days, `YYYYMM` for months.
    pub fn code(self) -> String {
        match self {
            Self::Day(date) => format!(
                "{:04}{:02}{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            Self::Month(date) => format!("{:04}{:02}", date.year(), u8::from(date.month())),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidPeriod {
            value: input.to_owned(),
        };
        if !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(invalid());
        }

        let (year, month, day) = match trimmed.len() {
            8 => (&trimmed[0..4], &trimmed[4..6], Some(&trimmed[6..8])),
            6 => (&trimmed[0..4], &trimmed[4..6], None),
            _ => return Err(invalid()),
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        match day {
            Some(day) => {
                let day: u8 = day.parse().map_err(|_| invalid())?;
                Date::from_calendar_date(year, month, day)
                    .map(Self::Day)
                    .map_err(|_| invalid())
            }
            None => Date::from_calendar_date(year, month, 1)
                .map(Self::Month)
                .map_err(|_| invalid()),
        }
    }
}

fn first_of_month(date: Date) -> Date {
    Date::from_calendar_date(date.year(), date.month(), 1).unwrap_or(date)
}

impl Display for ObservationPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for ObservationPeriod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for ObservationPeriod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn day_steps_across_month_boundary() {
        let period = ObservationPeriod::Day(date!(2025 - 03 - 01));
        assert_eq!(period.step_back().code(), "20250228");
    }

    #[test]
    fn month_steps_across_year_boundary() {
        let period = ObservationPeriod::containing(Granularity::Month, date!(2025 - 01 - 17));
        assert_eq!(period.code(), "202501");
        assert_eq!(period.step_back().code(), "202412");
    }

    #[test]
    fn parses_day_and_month_codes() {
        let day = ObservationPeriod::parse("20241231").expect("day");
        assert_eq!(day, ObservationPeriod::Day(date!(2024 - 12 - 31)));

        let month = ObservationPeriod::parse("202402").expect("month");
        assert_eq!(month, ObservationPeriod::Month(date!(2024 - 02 - 01)));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(ObservationPeriod::parse("20240230").is_err());
        assert!(ObservationPeriod::parse("202413").is_err());
        assert!(ObservationPeriod::parse("2024-01").is_err());
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date("2025-06-30").expect("date"), date!(2025 - 06 - 30));
        assert!(parse_iso_date("30/06/2025").is_err());
    }
}
