//! Calendar and fiscal period keys.
//!
//! `YearMonth` is the canonical `YYYYMM` join key between budgets and actuals.
//! Any string that is not six ASCII digits with a month in 01..=12 is rejected;
//! there is no silent coercion.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of monthly slots in a fiscal year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Fiscal year start month used when nothing else is configured (April).
pub const DEFAULT_FISCAL_START_MONTH: u32 = 4;

/// Period parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Not a `YYYYMM` key.
    #[error("Invalid year-month format (expected YYYYMM): {0:?}")]
    InvalidYearMonth(String),

    /// Fiscal start month outside 1..=12.
    #[error("Invalid fiscal start month: {0}")]
    InvalidStartMonth(u32),
}

/// A calendar month key in `YYYYMM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a key from numeric parts.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidYearMonth` when the year is outside 0..=9999
    /// or the month is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidYearMonth(format!("{year:04}{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parses a `YYYYMM` string.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidYearMonth` carrying the offending input.
    pub fn parse(s: &str) -> Result<Self, PeriodError> {
        let invalid = || PeriodError::InvalidYearMonth(s.to_string());

        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..].parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }

    /// Derives the key for a transaction date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month (1..=12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The following month.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Iterates months from `self` through `end`, inclusive.
    pub fn through(self, end: Self) -> impl Iterator<Item = Self> {
        std::iter::successors(Some(self), move |ym| {
            let next = ym.next();
            (next <= end).then_some(next)
        })
        .take_while(move |ym| *ym <= end)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = PeriodError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// A fiscal year made of 12 consecutive months.
///
/// Identified by the calendar year in which it starts; FY2024 with an April
/// start covers `202404..=202503`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Calendar year of the first month.
    pub start_year: i32,
    /// First calendar month (1..=12).
    pub start_month: u32,
}

impl FiscalYear {
    /// Creates a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error when `start_month` is not a calendar month or the
    /// year cannot be expressed as `YYYYMM`.
    pub fn new(start_year: i32, start_month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&start_month) {
            return Err(PeriodError::InvalidStartMonth(start_month));
        }
        // Both ends must be representable.
        let first = YearMonth::new(start_year, start_month)?;
        let _ = YearMonth::new(first.year() + 1, start_month)?;
        Ok(Self {
            start_year,
            start_month,
        })
    }

    /// Fiscal year that contains the given month.
    ///
    /// # Errors
    ///
    /// Returns an error when `start_month` is not a calendar month.
    pub fn containing(ym: YearMonth, start_month: u32) -> Result<Self, PeriodError> {
        let start_year = if ym.month() >= start_month {
            ym.year()
        } else {
            ym.year() - 1
        };
        Self::new(start_year, start_month)
    }

    /// First month of the fiscal year.
    #[must_use]
    pub fn first_month(&self) -> YearMonth {
        YearMonth {
            year: self.start_year,
            month: self.start_month,
        }
    }

    /// The 12 month keys in fiscal order.
    #[must_use]
    pub fn months(&self) -> [YearMonth; MONTHS_PER_YEAR] {
        let mut months = [self.first_month(); MONTHS_PER_YEAR];
        for i in 1..MONTHS_PER_YEAR {
            months[i] = months[i - 1].next();
        }
        months
    }

    /// Fiscal slot index (0..12) of a month, if it belongs to this year.
    #[must_use]
    pub fn slot_of(&self, ym: YearMonth) -> Option<usize> {
        self.months().iter().position(|m| *m == ym)
    }

    /// Returns true if the month belongs to this fiscal year.
    #[must_use]
    pub fn contains(&self, ym: YearMonth) -> bool {
        self.slot_of(ym).is_some()
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY{}", self.start_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("202404", 2024, 4)]
    #[case("199912", 1999, 12)]
    #[case("000001", 0, 1)]
    fn test_parse_valid(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
        let ym = YearMonth::parse(input).unwrap();
        assert_eq!(ym.year(), year);
        assert_eq!(ym.month(), month);
        assert_eq!(ym.to_string(), input);
    }

    #[rstest]
    #[case("")]
    #[case("2024-04")]
    #[case("20244")]
    #[case("2024040")]
    #[case("20240a")]
    #[case("202413")]
    #[case("202400")]
    #[case("+20244")]
    fn test_parse_invalid(#[case] input: &str) {
        assert_eq!(
            YearMonth::parse(input),
            Err(PeriodError::InvalidYearMonth(input.to_string()))
        );
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        assert_eq!(YearMonth::from_date(date).to_string(), "202404");
    }

    #[test]
    fn test_next_rolls_over_year() {
        let dec = YearMonth::parse("202412").unwrap();
        assert_eq!(dec.next().to_string(), "202501");
    }

    #[test]
    fn test_through_inclusive() {
        let start = YearMonth::parse("202411").unwrap();
        let end = YearMonth::parse("202502").unwrap();
        let months: Vec<String> = start.through(end).map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["202411", "202412", "202501", "202502"]);
    }

    #[test]
    fn test_through_empty_when_reversed() {
        let start = YearMonth::parse("202502").unwrap();
        let end = YearMonth::parse("202411").unwrap();
        assert_eq!(start.through(end).count(), 0);
    }

    #[test]
    fn test_serde_as_string() {
        let ym = YearMonth::parse("202404").unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"202404\"");
        assert!(serde_json::from_str::<YearMonth>("\"2024-04\"").is_err());
    }

    #[test]
    fn test_fiscal_year_months_april_start() {
        let fy = FiscalYear::new(2024, 4).unwrap();
        let months = fy.months();
        assert_eq!(months[0].to_string(), "202404");
        assert_eq!(months[8].to_string(), "202412");
        assert_eq!(months[9].to_string(), "202501");
        assert_eq!(months[11].to_string(), "202503");
    }

    #[test]
    fn test_fiscal_year_slot_of() {
        let fy = FiscalYear::new(2024, 4).unwrap();
        assert_eq!(fy.slot_of(YearMonth::parse("202404").unwrap()), Some(0));
        assert_eq!(fy.slot_of(YearMonth::parse("202503").unwrap()), Some(11));
        assert_eq!(fy.slot_of(YearMonth::parse("202504").unwrap()), None);
        assert!(!fy.contains(YearMonth::parse("202403").unwrap()));
    }

    #[test]
    fn test_fiscal_year_containing() {
        let fy = FiscalYear::containing(YearMonth::parse("202502").unwrap(), 4).unwrap();
        assert_eq!(fy.start_year, 2024);
        let fy = FiscalYear::containing(YearMonth::parse("202404").unwrap(), 4).unwrap();
        assert_eq!(fy.start_year, 2024);
    }

    #[test]
    fn test_fiscal_year_invalid_start_month() {
        assert_eq!(
            FiscalYear::new(2024, 13),
            Err(PeriodError::InvalidStartMonth(13))
        );
    }
}
