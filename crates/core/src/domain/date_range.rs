use chrono::NaiveDate;
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const INVALID_DATE_MESSAGE: &str = "Please enter valid dates in YYYY-MM-DD format.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDateInput {
    pub field: &'static str,
    pub value: String,
}

impl InvalidDateInput {
    /// Text shown to the person who typed the dates.
    pub fn user_message(&self) -> &'static str {
        INVALID_DATE_MESSAGE
    }
}

impl fmt::Display for InvalidDateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} {:?}: expected a calendar date in YYYY-MM-DD form",
            self.field, self.value
        )
    }
}

impl std::error::Error for InvalidDateInput {}

/// Query window for the feed. Only parseability is checked; the feed itself
/// rejects spans it does not serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, InvalidDateInput> {
        Ok(Self {
            start_date: parse_date("start_date", start_date)?,
            end_date: parse_date("end_date", end_date)?,
        })
    }

    pub fn query_params(&self, api_key: &str) -> [(&'static str, String); 3] {
        [
            ("start_date", self.start_date.format(DATE_FORMAT).to_string()),
            ("end_date", self.end_date.format(DATE_FORMAT).to_string()),
            ("api_key", api_key.to_string()),
        ]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_date, self.end_date)
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, InvalidDateInput> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| InvalidDateInput {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let range = DateRange::parse("2023-01-01", "2023-01-07").unwrap();
        assert_eq!(range.start_date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(range.end_date, NaiveDate::from_ymd_opt(2023, 1, 7).unwrap());
        assert_eq!(range.to_string(), "2023-01-01..2023-01-07");
    }

    #[test]
    fn rejects_month_thirteen() {
        let err = DateRange::parse("2023-13-01", "2023-01-02").unwrap_err();
        assert_eq!(err.field, "start_date");
        assert_eq!(err.value, "2023-13-01");
        assert_eq!(err.user_message(), INVALID_DATE_MESSAGE);
    }

    #[test]
    fn rejects_bad_end_date() {
        let err = DateRange::parse("2023-01-01", "01/02/2023").unwrap_err();
        assert_eq!(err.field, "end_date");
        assert!(err.to_string().contains("01/02/2023"));
    }

    #[test]
    fn rejects_empty_and_impossible_days() {
        assert!(DateRange::parse("", "2023-01-01").is_err());
        assert!(DateRange::parse("2023-02-30", "2023-03-01").is_err());
    }

    #[test]
    fn does_not_enforce_ordering() {
        let range = DateRange::parse("2023-01-07", "2023-01-01").unwrap();
        assert!(range.start_date > range.end_date);
    }

    #[test]
    fn query_params_use_canonical_dates() {
        let range = DateRange::parse(" 2023-01-01", "2023-01-02 ").unwrap();
        let params = range.query_params("k");
        assert_eq!(params[0], ("start_date", "2023-01-01".to_string()));
        assert_eq!(params[1], ("end_date", "2023-01-02".to_string()));
        assert_eq!(params[2], ("api_key", "k".to_string()));
    }
}
