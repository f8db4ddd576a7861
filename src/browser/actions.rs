use crate::backend::{BackendError, ListingBackend};
use crate::browser::messages;
use crate::browser::session::{BrowserSession, BusyGuard};
use crate::browser::state::{Action, BrowserState};
use crate::browser::table::ListingTable;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const EXPORT_FILENAME: &str = "real_estate_data.xlsx";

/// How a backend-bound action ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loaded(usize),
    Empty,
    /// A search replaced the complex list while the request was in flight;
    /// the result was dropped and the page left as the search set it.
    Superseded,
}

#[derive(Debug, Error)]
pub enum ActionError {
    /// Rejected before any request was made.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("{0:?} is already in flight")]
    Busy(Action),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Spreadsheet ready to be handed to the user.
#[derive(Debug)]
pub struct Download {
    pub filename: &'static str,
    pub bytes: Vec<u8>,
}

/// The listing browser's operations. Every one of them records its result
/// as a status message in the session, so the caller only has to re-render.
#[derive(Clone)]
pub struct ListingBrowser {
    backend: Arc<dyn ListingBackend>,
}

impl ListingBrowser {
    pub fn new(backend: Arc<dyn ListingBackend>) -> Self {
        Self { backend }
    }

    pub fn search_region(
        &self,
        session: &BrowserSession,
        keyword: &str,
    ) -> Result<Outcome, ActionError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(reject(session, messages::EMPTY_KEYWORD));
        }

        let _busy = begin(session, Action::Search)?;
        {
            let mut state = session.lock();
            state.keyword = keyword.to_string();
            state.complexes.clear();
            state.selected_complex = None;
            state.set_info(messages::SEARCHING);
        }

        info!(keyword, "region search");
        let result = self.backend.search_region(keyword);

        let mut state = session.lock();
        match result {
            Ok(complexes) if complexes.is_empty() => {
                info!(keyword, "no complexes");
                state.set_error(messages::NO_COMPLEXES);
                Ok(Outcome::Empty)
            }
            Ok(complexes) => {
                let n = complexes.len();
                info!(keyword, complexes = n, "region search done");
                state.complexes = complexes;
                state.set_info(messages::complexes_found(n));
                Ok(Outcome::Loaded(n))
            }
            Err(e) => {
                warn!(keyword, error = %e, "region search failed");
                state.set_error(failure_message(&e, messages::SEARCH_FAILED));
                Err(e.into())
            }
        }
    }

    pub fn fetch_listings(
        &self,
        session: &BrowserSession,
        complex_no: &str,
        trade_type: &str,
    ) -> Result<Outcome, ActionError> {
        let complex_no = complex_no.trim();
        if complex_no.is_empty() || !session.lock().has_complex(complex_no) {
            return Err(reject(session, messages::SELECT_COMPLEX));
        }

        let _busy = begin(session, Action::Fetch)?;
        {
            let mut state = session.lock();
            state.selected_complex = Some(complex_no.to_string());
            state.trade_type = trade_type.to_string();
            state.table.clear();
            state.set_info(messages::FETCHING);
        }

        info!(complex_no, trade_type, "listing fetch");
        let result = self.backend.fetch_listings(complex_no, trade_type);

        let mut state = session.lock();
        if !state.has_complex(complex_no) {
            info!(complex_no, "complex no longer listed, fetch result dropped");
            return Ok(Outcome::Superseded);
        }
        match result {
            Ok(records) if records.is_empty() => {
                info!(complex_no, "no listings");
                state.set_info(messages::NO_LISTINGS);
                Ok(Outcome::Empty)
            }
            Ok(records) => {
                let n = records.len();
                info!(complex_no, listings = n, "listing fetch done");
                state.table = ListingTable::from_records(&records);
                state.set_info(messages::listings_collected(n));
                Ok(Outcome::Loaded(n))
            }
            Err(e) => {
                warn!(complex_no, error = %e, "listing fetch failed");
                state.set_error(failure_message(&e, messages::FETCH_FAILED));
                Err(e.into())
            }
        }
    }

    /// Exports the table as currently shown, edits included.
    pub fn export_to_spreadsheet(&self, session: &BrowserSession) -> Result<Download, ActionError> {
        let rows = session.lock().table.export_rows();
        if rows.is_empty() {
            return Err(reject(session, messages::NOTHING_TO_EXPORT));
        }

        let _busy = begin(session, Action::Export)?;

        info!(rows = rows.len(), "spreadsheet export");
        let result = self.backend.export_spreadsheet(&rows);

        let mut state = session.lock();
        match result {
            Ok(bytes) => {
                state.set_info(messages::exported(rows.len()));
                Ok(Download {
                    filename: EXPORT_FILENAME,
                    bytes,
                })
            }
            Err(e) => {
                warn!(error = %e, "spreadsheet export failed");
                state.set_error(messages::EXPORT_FAILED);
                Err(e.into())
            }
        }
    }

    /// Replaces the text of one data cell (0-based row, column 1..=11).
    pub fn edit_cell(
        &self,
        session: &BrowserSession,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<(), ActionError> {
        let mut state = session.lock();
        if state.table.set_cell(row, col, value.trim()) {
            debug!(row, col, "table cell edited");
            Ok(())
        } else {
            set_rejection(&mut state, messages::NO_SUCH_CELL);
            Err(ActionError::Invalid(messages::NO_SUCH_CELL))
        }
    }
}

fn begin(session: &BrowserSession, action: Action) -> Result<BusyGuard<'_>, ActionError> {
    match session.begin(action) {
        Some(guard) => Ok(guard),
        None => {
            debug!(?action, "rejected: already in flight");
            session.lock().set_error(messages::ALREADY_RUNNING);
            Err(ActionError::Busy(action))
        }
    }
}

fn reject(session: &BrowserSession, msg: &'static str) -> ActionError {
    set_rejection(&mut session.lock(), msg);
    ActionError::Invalid(msg)
}

fn set_rejection(state: &mut BrowserState, msg: &'static str) {
    debug!(msg, "rejected before request");
    state.set_error(msg);
}

/// Server-reported messages are shown verbatim; transport and decoding
/// problems get the action's generic text.
fn failure_message(err: &BackendError, generic: &str) -> String {
    if let Some(msg) = err.server_message() {
        return messages::server_error(msg);
    }
    match err {
        BackendError::Status(_) => messages::UNKNOWN_SERVER_ERROR.to_string(),
        _ => generic.to_string(),
    }
}
