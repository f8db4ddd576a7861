use crate::backend::Complex;
use crate::browser::table::ListingTable;

/// The user-triggered actions that talk to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    Fetch,
    Export,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BusyFlags {
    search: bool,
    fetch: bool,
    export: bool,
}

impl BusyFlags {
    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Search => &mut self.search,
            Action::Fetch => &mut self.fetch,
            Action::Export => &mut self.export,
        }
    }

    pub fn is_busy(&self, action: Action) -> bool {
        match action {
            Action::Search => self.search,
            Action::Fetch => self.fetch,
            Action::Export => self.export,
        }
    }

    /// Marks `action` busy. False if it already was.
    pub(crate) fn acquire(&mut self, action: Action) -> bool {
        let slot = self.slot(action);
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub(crate) fn release(&mut self, action: Action) {
        *self.slot(action) = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Everything the page shows for one browser session.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub keyword: String,
    /// Result of the last search, in backend order.
    pub complexes: Vec<Complex>,
    pub selected_complex: Option<String>,
    pub trade_type: String,
    pub table: ListingTable,
    pub status: Option<StatusMessage>,
    pub(crate) busy: BusyFlags,
}

impl BrowserState {
    /// The complex selector is usable only when there is something to pick.
    pub fn selector_enabled(&self) -> bool {
        !self.complexes.is_empty()
    }

    pub fn has_complex(&self, complex_no: &str) -> bool {
        self.complexes.iter().any(|c| c.complex_no == complex_no)
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.busy.is_busy(action)
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }
}
