//! The date selection panel and its day cells.
//!
//! The panel owns a [`DraftSelection`] seeded from the host's committed
//! date. Every [`PanelMessage`] that changes the draft is followed by a
//! recomputation of the [`MonthGrid`], so the grid, header and cells always
//! describe the drafted month.

use std::{fmt, sync::Arc};

use tracing::{debug, trace};

use crate::{
    CalendarDate, CalendarLocale, DAYS_PER_WEEK, GridCell, MonthGrid, PANEL_TITLE, ParseError,
    YearMonth,
    types::{Month, Year},
};

/// Column width of one rendered cell.
const CELL_WIDTH: usize = 4;

/// Transient year/month/day chosen in the panel.
///
/// `day` is kept across month changes and may not exist in the drafted
/// month (day 31 after moving to April); such a draft does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftSelection {
    pub year:  Year,
    pub month: Month,
    pub day:   u8,
}

impl DraftSelection {
    pub const fn year_month(&self) -> YearMonth {
        YearMonth::new(self.year, self.month)
    }

    const fn with_month(self, month: YearMonth) -> Self {
        Self {
            year: month.year,
            month: month.month,
            ..self
        }
    }
}

impl From<CalendarDate> for DraftSelection {
    fn from(date: CalendarDate) -> Self {
        Self {
            year:  date.year(),
            month: date.month(),
            day:   date.day().get(),
        }
    }
}

/// User input the panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMessage {
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    /// A day cell was tapped.
    SelectDay(u8),
    /// Confirm the draft.
    Apply,
    /// Close without committing.
    Cancel,
}

/// How the panel finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    /// The draft resolved to a date the host should commit.
    Committed(CalendarDate),
    /// Closed without a new date.
    Dismissed,
}

/// One rendered cell of the day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    cell:     GridCell,
    selected: bool,
}

impl DayCell {
    /// A cell highlighted when its day equals `selected_day`.
    pub fn new(cell: GridCell, selected_day: u8) -> Self {
        Self {
            cell,
            selected: cell.day() == Some(selected_day),
        }
    }

    pub const fn day(&self) -> Option<u8> {
        self.cell.day()
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// The message a tap on this cell produces; blank cells produce none.
    pub fn tap(&self) -> Option<PanelMessage> {
        self.cell.day().map(PanelMessage::SelectDay)
    }
}

impl fmt::Display for DayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.cell.day(), self.selected) {
            (Some(day), true) => write!(f, "[{day:>2}]"),
            (Some(day), false) => write!(f, " {day:>2} "),
            (None, _) => write!(f, "{:width$}", "", width = CELL_WIDTH),
        }
    }
}

/// Month/year navigation, weekday header and day grid around a draft.
pub struct DateSelectionPanel {
    locale: Arc<dyn CalendarLocale>,
    draft:  DraftSelection,
    grid:   MonthGrid,
}

impl DateSelectionPanel {
    /// Opens on the month containing `seed`, with `seed`'s day selected.
    pub fn open(locale: Arc<dyn CalendarLocale>, seed: CalendarDate) -> Self {
        let draft = DraftSelection::from(seed);
        let grid = MonthGrid::for_locale(draft.year_month(), locale.as_ref());
        debug!(%seed, "date selection panel opened");
        Self {
            locale,
            draft,
            grid,
        }
    }

    pub const fn draft(&self) -> DraftSelection {
        self.draft
    }

    pub const fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub const fn displayed_month(&self) -> YearMonth {
        self.draft.year_month()
    }

    /// Name of the drafted month.
    pub fn month_title(&self) -> &str {
        self.locale.month_name(self.draft.month)
    }

    /// Drafted year, without digit grouping.
    pub fn year_title(&self) -> String {
        self.draft.year.to_string()
    }

    /// Weekday names in grid column order.
    pub fn weekday_header(&self) -> Vec<&str> {
        self.locale.short_weekday_names()
    }

    pub fn day_cell(&self, week: u8, column: u8) -> DayCell {
        DayCell::new(self.grid.cell(week, column), self.draft.day)
    }

    /// Grid rows as day cells, with the drafted day highlighted.
    pub fn day_cells(&self) -> Vec<[DayCell; DAYS_PER_WEEK as usize]> {
        self.grid
            .rows()
            .map(|row| row.map(|cell| DayCell::new(cell, self.draft.day)))
            .collect()
    }

    /// Applies one input. Returns `Some` once the panel is finished and
    /// should be closed.
    pub fn update(&mut self, message: PanelMessage) -> Option<PanelOutcome> {
        trace!(?message, "panel message");
        match message {
            PanelMessage::PrevMonth => self.navigate(YearMonth::prev),
            PanelMessage::NextMonth => self.navigate(YearMonth::next),
            PanelMessage::PrevYear => self.navigate(YearMonth::prev_year),
            PanelMessage::NextYear => self.navigate(YearMonth::next_year),
            PanelMessage::SelectDay(day) => self.select_day(day),
            PanelMessage::Apply => return Some(self.apply()),
            PanelMessage::Cancel => {
                debug!("date selection cancelled");
                return Some(PanelOutcome::Dismissed);
            },
        }
        None
    }

    /// Resolves the draft through the locale.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDay` when the drafted day does not exist
    /// in the drafted month.
    pub fn resolve(&self) -> Result<CalendarDate, ParseError> {
        self.locale
            .date_from(self.draft.year.get(), self.draft.month.get(), self.draft.day)
    }

    fn apply(&self) -> PanelOutcome {
        match self.resolve() {
            Ok(date) => {
                debug!(%date, "date selection applied");
                PanelOutcome::Committed(date)
            },
            Err(err) => {
                // Invalid drafts leave the committed date as it was
                debug!(%err, "draft does not resolve, nothing committed");
                PanelOutcome::Dismissed
            },
        }
    }

    fn navigate(&mut self, step: impl FnOnce(YearMonth) -> Option<YearMonth>) {
        let current = self.draft.year_month();
        match step(current) {
            Some(month) => {
                debug!(from = %current, to = %month, "panel navigated");
                self.draft = self.draft.with_month(month);
                self.refresh();
            },
            None => debug!(month = %current, "navigation outside supported years ignored"),
        }
    }

    fn select_day(&mut self, day: u8) {
        if self.grid.position_of(day).is_none() {
            debug!(day, month = %self.grid.month(), "day not in displayed month");
            return;
        }
        debug!(day, "day selected");
        self.draft.day = day;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.grid = MonthGrid::for_locale(self.draft.year_month(), self.locale.as_ref());
        trace!(
            month = %self.grid.month(),
            offset = self.grid.offset(),
            weeks = self.grid.weeks(),
            "grid recomputed"
        );
    }
}

impl fmt::Debug for DateSelectionPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateSelectionPanel")
            .field("draft", &self.draft)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DateSelectionPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PANEL_TITLE}")?;
        writeln!(f, "< {} >  < {} >", self.month_title(), self.year_title())?;

        let header: String = self
            .weekday_header()
            .iter()
            .map(|name| format!("{name:>width$} ", width = CELL_WIDTH - 1))
            .collect();
        writeln!(f, "{}", header.trim_end())?;
        writeln!(f, "{}", "-".repeat(CELL_WIDTH * usize::from(DAYS_PER_WEEK)))?;

        for row in self.day_cells() {
            let line: String = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
