use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{
    CalendarDate, CalendarLocale, DateSelectionPanel, PanelMessage, PanelOutcome,
    SELECTED_DATE_LABEL,
};

/// The view embedding the picker: a label showing the committed date and
/// a button presenting the selection panel.
///
/// The committed date changes only through [`set_selected_date`] or an
/// applied panel. Closing the panel any other way drops its draft.
///
/// [`set_selected_date`]: HostView::set_selected_date
pub struct HostView {
    locale:   Arc<dyn CalendarLocale>,
    selected: CalendarDate,
    panel:    Option<DateSelectionPanel>,
}

impl HostView {
    /// Starts with the locale's current date committed.
    pub fn new(locale: Arc<dyn CalendarLocale>) -> Self {
        let today = locale.current_date();
        Self::with_date(locale, today)
    }

    pub fn with_date(locale: Arc<dyn CalendarLocale>, selected: CalendarDate) -> Self {
        Self {
            locale,
            selected,
            panel: None,
        }
    }

    pub const fn selected_date(&self) -> CalendarDate {
        self.selected
    }

    pub fn set_selected_date(&mut self, date: CalendarDate) {
        self.selected = date;
    }

    pub const fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    /// Opens or closes the panel. Closing discards the draft.
    pub fn set_panel_open(&mut self, open: bool) {
        if open {
            self.open_panel();
        } else {
            self.close_panel();
        }
    }

    /// Presents the panel seeded from the committed date. An already open
    /// panel keeps its draft.
    pub fn open_panel(&mut self) {
        if self.panel.is_none() {
            self.panel = Some(DateSelectionPanel::open(
                Arc::clone(&self.locale),
                self.selected,
            ));
        }
    }

    pub fn close_panel(&mut self) {
        if self.panel.take().is_some() {
            debug!("date selection panel closed");
        }
    }

    pub const fn panel(&self) -> Option<&DateSelectionPanel> {
        self.panel.as_ref()
    }

    /// Forwards a message to the open panel, committing and closing as the
    /// panel finishes. Messages sent while the panel is closed are dropped.
    pub fn send(&mut self, message: PanelMessage) -> Option<PanelOutcome> {
        let Some(panel) = self.panel.as_mut() else {
            debug!(?message, "no panel open, message dropped");
            return None;
        };
        let outcome = panel.update(message)?;
        if let PanelOutcome::Committed(date) = outcome {
            debug!(from = %self.selected, to = %date, "selected date committed");
            self.selected = date;
        }
        self.close_panel();
        Some(outcome)
    }

    /// `Selected date: Aug 23, 2020`
    pub fn label(&self) -> String {
        format!(
            "{SELECTED_DATE_LABEL} {}",
            self.locale.format_medium(self.selected)
        )
    }
}

impl fmt::Debug for HostView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostView")
            .field("selected", &self.selected)
            .field("panel", &self.panel)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for HostView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label())?;
        if let Some(panel) = &self.panel {
            write!(f, "\n{panel}")?;
        }
        Ok(())
    }
}
