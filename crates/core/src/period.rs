//! Date filters: calendar year/month selection, inclusive ranges and rolling windows.

use core::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Sentinel accepted by the string constructors for "no restriction".
pub const ALL: &str = "all";

/// Calendar filter with independent year and month parts.
///
/// `None` on either side means "all". Months are 1-based (January = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodFilter {
    year: Option<i32>,
    month: Option<u32>,
}

impl PeriodFilter {
    /// No filtering at all.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(year: Option<i32>, month: Option<u32>) -> DomainResult<Self> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(DomainError::validation(format!(
                    "month must be between 1 and 12, got {m}"
                )));
            }
        }
        Ok(Self { year, month })
    }

    /// Parse the textual selector pair, where `"all"` lifts the restriction.
    pub fn parse(year: &str, month: &str) -> DomainResult<Self> {
        let year = parse_part::<i32>("year", year)?;
        let month = parse_part::<u32>("month", month)?;
        Self::new(year, month)
    }

    /// The filter selecting exactly the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month()),
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn is_all(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        let year_ok = self.year.is_none_or(|y| date.year() == y);
        let month_ok = self.month.is_none_or(|m| date.month() == m);
        year_ok && month_ok
    }

    /// Keep the records whose date matches.
    ///
    /// An all/all filter returns the input unchanged, order included.
    pub fn apply<T: Clone>(&self, records: &[T], date_of: impl Fn(&T) -> NaiveDate) -> Vec<T> {
        if self.is_all() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| self.matches(date_of(r)))
            .cloned()
            .collect()
    }
}

fn parse_part<T: FromStr>(field: &str, raw: &str) -> DomainResult<Option<T>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(ALL) {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| DomainError::validation(format!("invalid {field} selector: {raw:?}")))
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if start > end {
            return Err(DomainError::validation(format!(
                "range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Trailing window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollingPeriod {
    #[default]
    All,
    Weekly,
    Monthly,
    Yearly,
}

impl RollingPeriod {
    /// First date included in the window, `None` for `All`.
    pub fn start_date(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            RollingPeriod::All => None,
            RollingPeriod::Weekly => today.checked_sub_days(Days::new(7)),
            RollingPeriod::Monthly => today.checked_sub_months(Months::new(1)),
            RollingPeriod::Yearly => today.checked_sub_months(Months::new(12)),
        }
    }

    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        self.start_date(today).is_none_or(|start| date >= start)
    }
}

impl FromStr for RollingPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RollingPeriod::All),
            "weekly" => Ok(RollingPeriod::Weekly),
            "monthly" => Ok(RollingPeriod::Monthly),
            "yearly" => Ok(RollingPeriod::Yearly),
            other => Err(DomainError::validation(format!(
                "period must be one of: all, weekly, monthly, yearly (got {other:?})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn all_all_is_identity() {
        let dates = vec![d(2023, 12, 31), d(2024, 1, 1), d(2022, 6, 15)];
        let out = PeriodFilter::all().apply(&dates, |x| *x);
        assert_eq!(out, dates);
    }

    #[test]
    fn parse_accepts_all_sentinel() {
        let f = PeriodFilter::parse("all", "ALL").unwrap();
        assert!(f.is_all());
        let f = PeriodFilter::parse("2024", "all").unwrap();
        assert_eq!(f.year(), Some(2024));
        assert_eq!(f.month(), None);
    }

    #[test]
    fn month_only_filter_spans_years() {
        let f = PeriodFilter::new(None, Some(3)).unwrap();
        assert!(f.matches(d(2021, 3, 1)));
        assert!(f.matches(d(2024, 3, 31)));
        assert!(!f.matches(d(2024, 4, 1)));
    }

    #[test]
    fn year_and_month_must_both_match() {
        let f = PeriodFilter::new(Some(2024), Some(2)).unwrap();
        assert!(f.matches(d(2024, 2, 29)));
        assert!(!f.matches(d(2023, 2, 1)));
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(PeriodFilter::new(None, Some(13)).is_err());
        assert!(PeriodFilter::parse("2024", "0").is_err());
        assert!(PeriodFilter::parse("twenty", "all").is_err());
    }

    #[test]
    fn date_range_is_inclusive() {
        let r = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(r.contains(d(2024, 1, 1)));
        assert!(r.contains(d(2024, 1, 31)));
        assert!(!r.contains(d(2024, 2, 1)));
        assert!(DateRange::new(d(2024, 2, 1), d(2024, 1, 1)).is_err());
    }

    #[test]
    fn rolling_windows_start_relative_to_today() {
        let today = d(2024, 3, 31);
        assert_eq!(RollingPeriod::Weekly.start_date(today), Some(d(2024, 3, 24)));
        assert_eq!(RollingPeriod::Monthly.start_date(today), Some(d(2024, 2, 29)));
        assert_eq!(RollingPeriod::Yearly.start_date(today), Some(d(2023, 3, 31)));
        assert!(RollingPeriod::All.contains(d(1999, 1, 1), today));
        assert!(!RollingPeriod::Weekly.contains(d(2024, 3, 23), today));
    }

    #[test]
    fn rolling_period_parses_names() {
        assert_eq!("Monthly".parse::<RollingPeriod>().unwrap(), RollingPeriod::Monthly);
        assert!("fortnightly".parse::<RollingPeriod>().is_err());
    }
}
