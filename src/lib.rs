//! A headless date-picker widget.
//!
//! A [`HostView`] holds the committed date and presents a
//! [`DateSelectionPanel`] on request. The panel keeps a transient
//! [`DraftSelection`], lays the displayed month out as a [`MonthGrid`] and
//! writes back to the host only when the draft is applied. Month and weekday
//! names and the first day of the week come from a [`CalendarLocale`].
//!
//! ```
//! use calendar_picker::{CalendarDate, GregorianLocale, HostView, PanelMessage};
//! use std::sync::Arc;
//!
//! let date: CalendarDate = "2024-02-10".parse()?;
//! let mut host = HostView::with_date(Arc::new(GregorianLocale::default()), date);
//!
//! host.open_panel();
//! host.send(PanelMessage::SelectDay(29));
//! host.send(PanelMessage::Apply);
//!
//! assert!(!host.is_panel_open());
//! assert_eq!(host.selected_date().to_string(), "2024-02-29");
//! # Ok::<(), calendar_picker::ParseError>(())
//! ```

mod consts;
mod date;
mod grid;
mod host;
mod locale;
mod panel;
mod prelude;
mod types;

pub use consts::*;
pub use date::CalendarDate;
pub use grid::{
    GridCell, MonthGrid, YearMonth, day_for_cell, month_offset, next_month, next_year, prev_month,
    prev_year, weeks_in_month,
};
pub use host::HostView;
pub use locale::{CalendarLocale, ConfigError, GregorianLocale, LocaleConfig};
pub use panel::{DateSelectionPanel, DayCell, DraftSelection, PanelMessage, PanelOutcome};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year, weekday_of};

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::InvalidYear(0).to_string(),
            "Invalid year: 0 (must be 1-9999)"
        );
        assert_eq!(
            ParseError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            ParseError::InvalidDay {
                month: 2,
                day: 30,
                year: 2024
            }
            .to_string(),
            "Invalid day 30 for month 2024-02"
        );
        assert_eq!(ParseError::EmptyInput.to_string(), "Empty date string");
    }
}
