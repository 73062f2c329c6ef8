use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const HUMAN_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day], [year]");

/// Calendar day of a daily price record, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    /// Today's date in UTC.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    /// Parse an ISO `YYYY-MM-DD` date key.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, ISO_DATE)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// Whole days from this date until `today`; negative for future dates.
    pub fn days_before(self, today: TradingDate) -> i64 {
        (today.0 - self.0).whole_days()
    }

    pub fn format_iso(self) -> String {
        self.format_with(ISO_DATE)
    }

    /// Short display form used by the HUD, e.g. `Mar 07, 2024`.
    pub fn format_human(self) -> String {
        self.format_with(HUMAN_DATE)
    }

    fn format_with(self, format: &[BorrowedFormatItem<'_>]) -> String {
        self.0
            .format(format)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
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

    fn date(value: &str) -> TradingDate {
        TradingDate::parse(value).expect("valid date")
    }

    #[test]
    fn parses_and_formats_iso_date() {
        assert_eq!(date("2024-03-07").format_iso(), "2024-03-07");
    }

    #[test]
    fn rejects_malformed_dates() {
        for value in [
            "2024-3-07",
            "2024-02-30",
            "2024/03/07",
            "2024-03-07T00:00",
            "",
            "yyyy-mm-dd",
        ] {
            let err = TradingDate::parse(value).expect_err("must fail");
            assert!(matches!(err, ValidationError::InvalidDate { .. }), "{value}");
        }
    }

    #[test]
    fn days_before_counts_calendar_days() {
        let today = date("2024-03-08");
        assert_eq!(date("2024-03-01").days_before(today), 7);
        assert_eq!(date("2024-03-08").days_before(today), 0);
        assert_eq!(date("2024-03-09").days_before(today), -1);
        assert_eq!(date("2023-11-29").days_before(today), 100);
    }

    #[test]
    fn human_format_uses_short_month() {
        assert_eq!(date("2024-03-07").format_human(), "Mar 07, 2024");
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(date("2023-12-31") < date("2024-01-01"));
    }
}
