use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// RFC3339 timestamp guaranteed to be UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = OffsetDateTime::parse(input, &Rfc3339).map_err(|_| {
            ValidationError::TimestampNotUtc {
                value: input.to_owned(),
            }
        })?;

        Self::from_offset_datetime(parsed).map_err(|_| ValidationError::TimestampNotUtc {
            value: input.to_owned(),
        })
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Result<Self, ValidationError> {
        if value.offset() != UtcOffset::UTC {
            return Err(ValidationError::TimestampNotUtc {
                value: value
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| String::from("<unformattable>")),
            });
        }

        Ok(Self(value))
    }

    /// Midnight UTC at the start of `date`.
    pub fn start_of(date: ScoreDate) -> Self {
        Self(date.into_inner().midnight().assume_utc())
    }

    /// Last representable instant of `date` in UTC.
    pub fn end_of(date: ScoreDate) -> Self {
        let end = date
            .into_inner()
            .with_hms_nano(23, 59, 59, 999_999_999)
            .unwrap_or_else(|_| date.into_inner().midnight());
        Self(end.assume_utc())
    }

    /// Accepts either an RFC3339 UTC timestamp or a bare `YYYY-MM-DD` date.
    pub fn parse_lenient(input: &str, end_of_day: bool) -> Option<Self> {
        if let Ok(parsed) = Self::parse(input) {
            return Some(parsed);
        }
        let date = ScoreDate::parse(input).ok()?;
        Some(if end_of_day {
            Self::end_of(date)
        } else {
            Self::start_of(date)
        })
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .expect("UtcDateTime must be RFC3339 formattable")
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Calendar date of a historical score point (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScoreDate(Date);

impl ScoreDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .expect("ScoreDate must be formattable")
    }
}

impl Display for ScoreDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for ScoreDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for ScoreDate {
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
    use super::*;

    #[test]
    fn parses_utc_timestamp() {
        let parsed = UtcDateTime::parse("2025-08-22T09:00:00Z").expect("must parse");
        assert_eq!(parsed.format_rfc3339(), "2025-08-22T09:00:00Z");
    }

    #[test]
    fn rejects_non_utc_timestamp() {
        let err = UtcDateTime::parse("2025-08-22T10:00:00+01:00").expect_err("must fail");
        assert!(matches!(err, ValidationError::TimestampNotUtc { .. }));
    }

    #[test]
    fn score_date_round_trips_through_text() {
        let date = ScoreDate::parse("2025-08-15").expect("date");
        assert_eq!(date.to_string(), "2025-08-15");
        assert!(ScoreDate::parse("15/08/2025").is_err());
    }

    #[test]
    fn lenient_parse_expands_bare_dates_to_day_bounds() {
        let start = UtcDateTime::parse_lenient("2025-08-20", false).expect("start");
        let end = UtcDateTime::parse_lenient("2025-08-20", true).expect("end");
        let inside = UtcDateTime::parse("2025-08-20T11:15:00Z").expect("inside");

        assert!(start <= inside && inside <= end);
        assert!(UtcDateTime::parse_lenient("yesterday", false).is_none());
    }
}
