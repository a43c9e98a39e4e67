//! Month grid arithmetic.
//!
//! A month is laid out as complete weeks of [`DAYS_PER_WEEK`] cells, the
//! first column being the locale's first weekday. Cells before day 1 and
//! after the last day of the month are [`GridCell::Empty`].

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, CalendarLocale, DAYS_PER_WEEK, DECEMBER, JANUARY, MIN_DAY, ParseError,
    prelude::*,
    types::{self, Month, Weekday, Year},
};

/// A year and month pair, the unit the panel navigates by.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct YearMonth {
    pub year:  Year,
    pub month: Month,
}

impl YearMonth {
    pub const fn new(year: Year, month: Month) -> Self {
        Self { year, month }
    }

    /// Validates raw components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth`.
    pub fn from_parts(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    /// Day 1 of this month.
    pub const fn first_day(self) -> CalendarDate {
        CalendarDate::first_of(self)
    }

    /// Weekday of day 1.
    pub fn first_weekday(self) -> Weekday {
        self.first_day().weekday()
    }

    /// Number of days in this month in the Gregorian calendar.
    pub const fn days(self) -> u8 {
        types::days_in_month(self.year.get(), self.month.get())
    }

    /// The following month, carrying into the next year after December.
    pub fn next(self) -> Option<Self> {
        next_month(self.year.get(), self.month.get()).and_then(|(y, m)| Self::from_parts(y, m).ok())
    }

    /// The preceding month, borrowing from the previous year before January.
    pub fn prev(self) -> Option<Self> {
        prev_month(self.year.get(), self.month.get()).and_then(|(y, m)| Self::from_parts(y, m).ok())
    }

    /// Same month one year later.
    pub fn next_year(self) -> Option<Self> {
        self.year.succ().map(|year| Self { year, ..self })
    }

    /// Same month one year earlier.
    pub fn prev_year(self) -> Option<Self> {
        self.year.pred().map(|year| Self { year, ..self })
    }
}

impl From<CalendarDate> for YearMonth {
    fn from(date: CalendarDate) -> Self {
        date.year_month()
    }
}

/// Advances `(year, month)` by one month.
/// Returns `None` when the result would leave the supported year range.
pub fn next_month(year: u16, month: u8) -> Option<(u16, u8)> {
    debug_assert!(month != 0 && month <= DECEMBER);
    if month == DECEMBER {
        next_year(year, JANUARY)
    } else {
        Some((year, month + 1))
    }
}

/// Steps `(year, month)` back by one month.
/// Returns `None` when the result would leave the supported year range.
pub fn prev_month(year: u16, month: u8) -> Option<(u16, u8)> {
    debug_assert!(month != 0 && month <= DECEMBER);
    if month == JANUARY {
        prev_year(year, DECEMBER)
    } else {
        Some((year, month - 1))
    }
}

/// Same month of the following year, if it is in range.
pub fn next_year(year: u16, month: u8) -> Option<(u16, u8)> {
    Year::new(year).ok()?.succ().map(|y| (y.get(), month))
}

/// Same month of the preceding year, if it is in range.
pub fn prev_year(year: u16, month: u8) -> Option<(u16, u8)> {
    Year::new(year).ok()?.pred().map(|y| (y.get(), month))
}

/// Number of blank cells before day 1 when weeks start on `first_weekday`.
/// Always in `0..DAYS_PER_WEEK`.
pub fn month_offset(month: YearMonth, first_weekday: Weekday) -> u8 {
    let first = month.first_weekday().days_from_sunday();
    (first + DAYS_PER_WEEK - first_weekday.days_from_sunday()) % DAYS_PER_WEEK
}

/// Rows needed to place every day of the month after `offset` blanks.
pub fn weeks_in_month(offset: u8, days_in_month: u8) -> u8 {
    let cells = u16::from(offset) + u16::from(days_in_month);
    // At most 73 rows
    u8::try_from(cells.div_ceil(u16::from(DAYS_PER_WEEK))).unwrap_or(u8::MAX)
}

/// The content of the cell at `week` (0-based row) and `column`
/// (0-based, 0 being the first weekday).
pub fn day_for_cell(week: u8, column: u8, offset: u8, days_in_month: u8) -> GridCell {
    if column >= DAYS_PER_WEEK {
        return GridCell::Empty;
    }
    let position =
        i32::from(DAYS_PER_WEEK) * i32::from(week) + i32::from(column) - i32::from(offset) + 1;
    u8::try_from(position)
        .ok()
        .filter(|day| (MIN_DAY..=days_in_month).contains(day))
        .map_or(GridCell::Empty, GridCell::Day)
}

/// One cell of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum GridCell {
    #[default]
    #[display(fmt = "")]
    Empty,
    #[display(fmt = "{_0}")]
    Day(u8),
}

impl GridCell {
    pub const fn day(self) -> Option<u8> {
        match self {
            Self::Day(day) => Some(day),
            Self::Empty => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Layout of one month: complete weeks of seven cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    month:         YearMonth,
    first_weekday: Weekday,
    offset:        u8,
    days:          u8,
    weeks:         u8,
}

impl MonthGrid {
    /// Lays out `month` with weeks starting on `first_weekday`.
    /// `days_in_month` is the locale's day count for the month.
    pub fn new(month: YearMonth, first_weekday: Weekday, days_in_month: u8) -> Self {
        let offset = month_offset(month, first_weekday);
        Self {
            month,
            first_weekday,
            offset,
            days: days_in_month,
            weeks: weeks_in_month(offset, days_in_month),
        }
    }

    /// Lays out `month` using the locale's week convention and day count.
    pub fn for_locale<L: CalendarLocale + ?Sized>(month: YearMonth, locale: &L) -> Self {
        Self::new(month, locale.first_weekday(), locale.days_in_month(month.year, month.month))
    }

    pub const fn month(&self) -> YearMonth {
        self.month
    }

    pub const fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Leading blank cells.
    pub const fn offset(&self) -> u8 {
        self.offset
    }

    pub const fn days_in_month(&self) -> u8 {
        self.days
    }

    /// Number of rows.
    pub const fn weeks(&self) -> u8 {
        self.weeks
    }

    /// Weekdays in column order.
    pub fn columns(&self) -> [Weekday; DAYS_PER_WEEK as usize] {
        self.first_weekday.week_from()
    }

    /// Cell content; positions outside the grid are empty.
    pub fn cell(&self, week: u8, column: u8) -> GridCell {
        if week >= self.weeks {
            return GridCell::Empty;
        }
        day_for_cell(week, column, self.offset, self.days)
    }

    /// One row of cells.
    pub fn week(&self, week: u8) -> [GridCell; DAYS_PER_WEEK as usize] {
        let mut row = [GridCell::Empty; DAYS_PER_WEEK as usize];
        for (column, slot) in (0..DAYS_PER_WEEK).zip(row.iter_mut()) {
            *slot = self.cell(week, column);
        }
        row
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = [GridCell; DAYS_PER_WEEK as usize]> + '_ {
        (0..self.weeks).map(|week| self.week(week))
    }

    /// Row and column holding `day`, if it belongs to this month.
    pub fn position_of(&self, day: u8) -> Option<(u8, u8)> {
        if !(MIN_DAY..=self.days).contains(&day) {
            return None;
        }
        let index = u16::from(self.offset) + u16::from(day) - 1;
        let week = u8::try_from(index / u16::from(DAYS_PER_WEEK)).ok()?;
        let column = u8::try_from(index % u16::from(DAYS_PER_WEEK)).ok()?;
        Some((week, column))
    }
}
