use crate::ParseError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_YEAR,
};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A year value guaranteed to be in the range `MIN_YEAR..=MAX_YEAR` (1..=9999)
/// Uses `NonZeroU16` internally, so 0 is not a valid year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// The earliest representable year.
    pub const MIN: Self = Self(NonZeroU16::MIN);

    /// Creates a new Year, validating that it's non-zero and <= `MAX_YEAR`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the value is 0 or > `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(value).ok_or(ParseError::InvalidYear(value))?;
        if value > MAX_YEAR {
            return Err(ParseError::InvalidYear(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// The following year, or `None` past `MAX_YEAR`.
    pub fn succ(self) -> Option<Self> {
        self.get().checked_add(1).and_then(|y| Self::new(y).ok())
    }

    /// The preceding year, or `None` before `MIN_YEAR`.
    pub fn pred(self) -> Option<Self> {
        match self.get() {
            MIN_YEAR => None,
            y => Self::new(y - 1).ok(),
        }
    }
}

impl TryFrom<u16> for Year {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    pub const JANUARY: Self = Self(NonZeroU8::MIN);

    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position, for indexing month name tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    /// Creates a new Day, validating that it's non-zero and valid for the given year and month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the value is 0 or invalid for the given year and month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, ParseError> {
        let invalid = ParseError::InvalidDay {
            month,
            day: value,
            year,
        };
        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;

        if month == 0 || month > MAX_MONTH || value > days_in_month(year, month) {
            return Err(invalid);
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without a year/month only the upper bound of the longest month applies
        let longest = DAYS_IN_MONTH.iter().copied().max().unwrap_or(31);
        NonZeroU8::new(value)
            .filter(|_| value <= longest)
            .map(Self)
            .ok_or(ParseError::InvalidDay {
                month: 0,
                day: value,
                year: 0,
            })
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Day of the week, numbered by the common locale convention where
/// Sunday is 1 and Saturday is 7.
///
/// Arithmetic delegates to [`chrono::Weekday`]; this type adds the
/// Sunday-first numbering and the lowercase config spelling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays, Sunday first.
    pub const ALL: [Self; DAYS_PER_WEEK as usize] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Locale weekday number, `1` (Sunday) through `7` (Saturday).
    pub fn number(self) -> u8 {
        self.days_from_sunday() + 1
    }

    /// Inverse of [`Weekday::number`].
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Self::ALL[(number - 1) as usize]),
            _ => None,
        }
    }

    /// The weekday `days` after this one.
    pub fn offset(self, days: u8) -> Self {
        let mut weekday = chrono::Weekday::from(self);
        for _ in 0..days % DAYS_PER_WEEK {
            weekday = weekday.succ();
        }
        weekday.into()
    }

    /// The seven weekdays in column order for a week starting on `self`.
    pub fn week_from(self) -> [Self; DAYS_PER_WEEK as usize] {
        let mut days = Self::ALL;
        for (column, slot) in (0..DAYS_PER_WEEK).zip(days.iter_mut()) {
            *slot = self.offset(column);
        }
        days
    }

    /// `0` for Sunday through `6` for Saturday.
    pub fn days_from_sunday(self) -> u8 {
        // num_days_from_sunday is 0..=6
        u8::try_from(chrono::Weekday::from(self).num_days_from_sunday()).unwrap_or(0)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sunday => Self::Sun,
            Weekday::Monday => Self::Mon,
            Weekday::Tuesday => Self::Tue,
            Weekday::Wednesday => Self::Wed,
            Weekday::Thursday => Self::Thu,
            Weekday::Friday => Self::Fri,
            Weekday::Saturday => Self::Sat,
        }
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Weekday of a calendar date, or `None` if the date does not exist.
pub fn weekday_of(year: u16, month: u8, day: u8) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .map(|date| date.weekday().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_new_valid() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2000).is_ok());
        assert!(Year::new(9999).is_ok());
    }

    #[test]
    fn test_year_new_invalid() {
        assert!(matches!(Year::new(0), Err(ParseError::InvalidYear(0))));
        assert!(matches!(
            Year::new(10000),
            Err(ParseError::InvalidYear(10000))
        ));
    }

    #[test]
    fn test_year_succ_pred_bounds() {
        let year = Year::new(2024).unwrap();
        assert_eq!(year.succ().map(Year::get), Some(2025));
        assert_eq!(year.pred().map(Year::get), Some(2023));

        assert_eq!(Year::new(MAX_YEAR).unwrap().succ(), None);
        assert_eq!(Year::new(MIN_YEAR).unwrap().pred(), None);
    }

    #[test]
    fn test_year_serde() {
        let year = Year::new(2024).unwrap();
        let json = serde_json::to_string(&year).unwrap();
        assert_eq!(json, "2024");

        let parsed: Year = serde_json::from_str(&json).unwrap();
        assert_eq!(year, parsed);
        assert!(serde_json::from_str::<Year>("0").is_err());
    }

    #[test]
    fn test_month_new() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_month_index() {
        assert_eq!(Month::new(1).unwrap().index(), 0);
        assert_eq!(Month::new(12).unwrap().index(), 11);
    }

    #[test]
    fn test_day_new_valid() {
        // January - 31 days
        assert!(Day::new(1, 2024, 1).is_ok());
        assert!(Day::new(31, 2024, 1).is_ok());

        // February non-leap - 28 days
        assert!(Day::new(28, 2023, 2).is_ok());
        assert!(Day::new(29, 2023, 2).is_err());

        // February leap year - 29 days
        assert!(Day::new(29, 2024, 2).is_ok());
        assert!(Day::new(30, 2024, 2).is_err());

        // April - 30 days
        assert!(Day::new(30, 2024, 4).is_ok());
        assert!(Day::new(31, 2024, 4).is_err());
    }

    #[test]
    fn test_day_new_invalid() {
        assert!(matches!(
            Day::new(0, 2024, 1),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            Day::new(32, 2024, 1),
            Err(ParseError::InvalidDay {
                month: 1,
                day: 32,
                year: 2024
            })
        ));
        // Month out of range never panics
        assert!(Day::new(1, 2024, 13).is_err());
    }

    #[test]
    fn test_day_try_from_u8() {
        let day: Day = 15.try_into().unwrap();
        assert_eq!(day.get(), 15);

        let result: Result<Day, _> = 0.try_into();
        assert!(result.is_err());
        let result: Result<Day, _> = 32.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2024,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_weekday_of_known_dates() {
        struct TestCase {
            date: (u16, u8, u8),
            weekday: Weekday,
        }

        let cases = [
            TestCase {
                date: (1970, 1, 1),
                weekday: Weekday::Thursday,
            },
            TestCase {
                date: (2000, 1, 1),
                weekday: Weekday::Saturday,
            },
            TestCase {
                date: (2020, 8, 23),
                weekday: Weekday::Sunday,
            },
            TestCase {
                date: (2024, 2, 1),
                weekday: Weekday::Thursday,
            },
            TestCase {
                date: (2024, 2, 29),
                weekday: Weekday::Thursday,
            },
            TestCase {
                date: (1, 1, 1),
                weekday: Weekday::Monday,
            },
            TestCase {
                date: (9999, 12, 31),
                weekday: Weekday::Friday,
            },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            assert_eq!(weekday_of(y, m, d), Some(case.weekday), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_weekday_of_matches_chrono_across_years() {
        for year in [1, 4, 100, 1582, 1900, 2000, 2024, 9999] {
            for month in 1..=MAX_MONTH {
                for day in 1..=days_in_month(year, month) {
                    let naive =
                        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                            .unwrap();
                    let weekday = weekday_of(year, month, day).unwrap();
                    assert_eq!(chrono::Weekday::from(weekday), naive.weekday());
                    assert_eq!(
                        u32::from(weekday.number()),
                        naive.weekday().number_from_sunday(),
                        "{year:04}-{month:02}-{day:02}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_weekday_of_nonexistent_date() {
        assert_eq!(weekday_of(2023, 2, 29), None);
        assert_eq!(weekday_of(2024, 4, 31), None);
        assert_eq!(weekday_of(2024, 13, 1), None);
    }

    #[test]
    fn test_weekday_chrono_conversion() {
        for weekday in Weekday::ALL {
            let converted = chrono::Weekday::from(weekday);
            assert_eq!(Weekday::from(converted), weekday);
            assert_eq!(u32::from(weekday.days_from_sunday()), converted.num_days_from_sunday());
        }
    }

    #[test]
    fn test_weekday_numbering() {
        assert_eq!(Weekday::Sunday.number(), 1);
        assert_eq!(Weekday::Saturday.number(), 7);
        for weekday in Weekday::ALL {
            assert_eq!(Weekday::from_number(weekday.number()), Some(weekday));
        }
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(8), None);
    }

    #[test]
    fn test_weekday_offset_wraps() {
        assert_eq!(Weekday::Saturday.offset(1), Weekday::Sunday);
        assert_eq!(Weekday::Monday.offset(6), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.offset(7), Weekday::Wednesday);
        assert_eq!(Weekday::Friday.offset(15), Weekday::Saturday);
    }

    #[test]
    fn test_week_from() {
        assert_eq!(Weekday::Sunday.week_from(), Weekday::ALL);
        let monday_first = Weekday::Monday.week_from();
        assert_eq!(monday_first[0], Weekday::Monday);
        assert_eq!(monday_first[6], Weekday::Sunday);
    }

    #[test]
    fn test_weekday_display_and_serde() {
        assert_eq!(Weekday::Thursday.to_string(), "Thursday");
        let json = serde_json::to_string(&Weekday::Monday).unwrap();
        assert_eq!(json, "\"monday\"");
        let parsed: Weekday = serde_json::from_str("\"saturday\"").unwrap();
        assert_eq!(parsed, Weekday::Saturday);
    }
}
