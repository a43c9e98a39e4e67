use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::{
    DATE_SEPARATOR, MONTH_FIRST_SEPARATOR, ParseError, YearMonth,
    prelude::*,
    types::{Day, Month, Weekday, Year},
};

/// A complete calendar date, the value a date picker commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

impl CalendarDate {
    /// 0001-01-01
    pub const MIN: Self = Self {
        year:  Year::MIN,
        month: Month::JANUARY,
        day:   Day::FIRST,
    };

    /// Combines typed components, checking the day against the month.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` if the day does not exist in that month.
    pub fn new(year: Year, month: Month, day: Day) -> Result<Self, ParseError> {
        // Day::try_from only checks 1..=31
        let day = Day::new(day.get(), year.get(), month.get())?;
        Ok(Self { year, month, day })
    }

    /// Validates raw components.
    ///
    /// # Errors
    /// Returns the `ParseError` for the first invalid component.
    pub fn from_parts(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
            day:   Day::new(day, year, month)?,
        })
    }

    pub(crate) const fn first_of(month: YearMonth) -> Self {
        Self {
            year:  month.year,
            month: month.month,
            day:   Day::FIRST,
        }
    }

    /// The local date according to the system clock.
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self::try_from(today).unwrap_or_else(|err| {
            tracing::warn!(%today, %err, "system date outside supported range");
            Self::MIN
        })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// `(year, month, day)` as plain integers.
    pub const fn components(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    pub const fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    pub fn weekday(&self) -> Weekday {
        // Every date in 1..=MAX_YEAR is representable as a NaiveDate
        self.to_naive_date()
            .map_or_else(Weekday::default, |date| date.weekday().into())
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::from(self.year.get()),
            u32::from(self.month.get()),
            u32::from(self.day.get()),
        )
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::InvalidFormat(format!("year out of range: {date}")))?;
        // month() and day() are 1..=12 and 1..=31
        let month = u8::try_from(date.month()).unwrap_or(0);
        let day = u8::try_from(date.day()).unwrap_or(0);
        Self::from_parts(year, month, day)
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::from_parts(year, month, day)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Accepts ISO `YYYY-MM-DD` or month-first `MM/DD/YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        let (separator, order) = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
                )));
            },
            (true, false) => (DATE_SEPARATOR, [0, 1, 2]),
            (false, true) => (MONTH_FIRST_SEPARATOR, [2, 0, 1]),
            (false, false) => return Err(ParseError::InvalidFormat(trimmed.to_owned())),
        };

        let parts: Vec<&str> = trimmed.split(separator).map(str::trim).collect();
        let [a, b, c] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected 3 components separated by '{separator}', found {}",
                parts.len()
            )));
        };
        let fields = [*a, *b, *c];
        let [year_idx, month_idx, day_idx] = order;

        let year = parse_u16(fields[year_idx])?;
        let month = parse_u8(fields[month_idx])?;
        let day = parse_u8(fields[day_idx])?;
        Self::from_parts(year, month, day)
    }
}

fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
