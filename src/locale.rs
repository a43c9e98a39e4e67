//! The calendar/locale provider the picker delegates names, week
//! convention and date resolution to.

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDate, DAYS_PER_WEEK, MAX_MONTH, ParseError,
    types::{self, Day, Month, Weekday, Year},
};

const MONTHS: usize = MAX_MONTH as usize;
const WEEKDAYS: usize = DAYS_PER_WEEK as usize;

const ENGLISH_MONTHS: [&str; MONTHS] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const ENGLISH_SHORT_MONTHS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const ENGLISH_SHORT_WEEKDAYS: [&str; WEEKDAYS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Error type for locale configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A name table has the wrong number of entries.
    #[error("{field} must have {expected} entries, found {found}")]
    WrongLength {
        field:    &'static str,
        expected: usize,
        found:    usize,
    },

    /// A name table contains an empty or whitespace-only entry.
    #[error("{field} entry {index} is blank")]
    BlankName { field: &'static str, index: usize },

    /// The configuration text is not valid TOML for a `LocaleConfig`.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Source of locale-dependent calendar data.
///
/// Implementors supply the name tables, the first day of the week and the
/// clock. Day counts and date resolution default to the proleptic Gregorian
/// calendar.
pub trait CalendarLocale: Send + Sync {
    /// Full month names, January first. Twelve entries.
    fn month_names(&self) -> &[String];

    /// Abbreviated month names, January first. Twelve entries.
    fn short_month_names(&self) -> &[String];

    /// Abbreviated weekday names, Sunday first. Seven entries.
    fn weekday_symbols(&self) -> &[String];

    /// Weekday shown in the first column of the grid.
    fn first_weekday(&self) -> Weekday;

    /// Today's date.
    fn current_date(&self) -> CalendarDate;

    /// Abbreviated weekday names in column order, starting at
    /// [`first_weekday`](Self::first_weekday).
    fn short_weekday_names(&self) -> Vec<&str> {
        let symbols = self.weekday_symbols();
        self.first_weekday()
            .week_from()
            .iter()
            .map(|day| {
                symbols
                    .get(usize::from(day.number() - 1))
                    .map_or("", String::as_str)
            })
            .collect()
    }

    fn month_name(&self, month: Month) -> &str {
        self.month_names()
            .get(month.index())
            .map_or("", String::as_str)
    }

    fn days_in_month(&self, year: Year, month: Month) -> u8 {
        types::days_in_month(year.get(), month.get())
    }

    /// Resolves raw components into a date.
    ///
    /// # Errors
    /// Returns `ParseError` if any component is out of range, including a
    /// day that does not exist in the month.
    fn date_from(&self, year: u16, month: u8, day: u8) -> Result<CalendarDate, ParseError> {
        CalendarDate::from_parts(year, month, day)
    }

    fn components_of(&self, date: CalendarDate) -> (Year, Month, Day) {
        (date.year(), date.month(), date.day())
    }

    /// Medium date style, e.g. `Aug 23, 2020`.
    fn format_medium(&self, date: CalendarDate) -> String {
        let month = self
            .short_month_names()
            .get(date.month().index())
            .map_or("", String::as_str);
        format!("{month} {}, {}", date.day(), date.year())
    }
}

/// Name tables and week convention for a [`GregorianLocale`].
///
/// Missing keys fall back to English with weeks starting on Sunday:
///
/// ```
/// use calendar_picker::{LocaleConfig, Weekday};
///
/// let config = LocaleConfig::from_toml_str("first_weekday = \"monday\"")?;
/// assert_eq!(config.first_weekday, Weekday::Monday);
/// assert_eq!(config.month_names[0], "January");
/// # Ok::<(), calendar_picker::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub month_names:         Vec<String>,
    pub short_month_names:   Vec<String>,
    /// Sunday first, regardless of `first_weekday`.
    pub short_weekday_names: Vec<String>,
    pub first_weekday:       Weekday,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            month_names:         ENGLISH_MONTHS.map(String::from).to_vec(),
            short_month_names:   ENGLISH_SHORT_MONTHS.map(String::from).to_vec(),
            short_weekday_names: ENGLISH_SHORT_WEEKDAYS.map(String::from).to_vec(),
            first_weekday:       Weekday::Sunday,
        }
    }
}

impl LocaleConfig {
    /// English names, weeks starting on Monday.
    pub fn iso() -> Self {
        Self {
            first_weekday: Weekday::Monday,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Toml` for malformed input and the
    /// [`validate`](Self::validate) errors for inconsistent tables.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks table sizes and rejects blank names.
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_names("month_names", &self.month_names, MONTHS)?;
        check_names("short_month_names", &self.short_month_names, MONTHS)?;
        check_names("short_weekday_names", &self.short_weekday_names, WEEKDAYS)
    }
}

fn check_names(field: &'static str, names: &[String], expected: usize) -> Result<(), ConfigError> {
    if names.len() != expected {
        return Err(ConfigError::WrongLength {
            field,
            expected,
            found: names.len(),
        });
    }
    match names.iter().position(|name| name.trim().is_empty()) {
        Some(index) => Err(ConfigError::BlankName { field, index }),
        None => Ok(()),
    }
}

/// Gregorian calendar with configurable names and week start.
#[derive(Debug, Clone, Default)]
pub struct GregorianLocale {
    config: LocaleConfig,
    today:  Option<CalendarDate>,
}

impl GregorianLocale {
    /// # Errors
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn new(config: LocaleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(first_weekday = %config.first_weekday, "locale configured");
        Ok(Self {
            config,
            today: None,
        })
    }

    /// Pins [`current_date`](CalendarLocale::current_date) to `date`
    /// instead of reading the system clock.
    #[must_use]
    pub fn with_today(mut self, date: CalendarDate) -> Self {
        self.today = Some(date);
        self
    }

    pub const fn config(&self) -> &LocaleConfig {
        &self.config
    }
}

impl CalendarLocale for GregorianLocale {
    fn month_names(&self) -> &[String] {
        &self.config.month_names
    }

    fn short_month_names(&self) -> &[String] {
        &self.config.short_month_names
    }

    fn weekday_symbols(&self) -> &[String] {
        &self.config.short_weekday_names
    }

    fn first_weekday(&self) -> Weekday {
        self.config.first_weekday
    }

    fn current_date(&self) -> CalendarDate {
        self.today.unwrap_or_else(CalendarDate::today)
    }
}
