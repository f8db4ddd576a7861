use crate::browser::state::{Action, BrowserState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared handle to one session's UI state.
///
/// Handlers lock it only to read or apply state; the lock is never held
/// while a backend request is in flight.
#[derive(Debug, Clone, Default)]
pub struct BrowserSession {
    state: Arc<Mutex<BrowserState>>,
}

impl BrowserSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, BrowserState> {
        // State is plain data; a panic elsewhere leaves it usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state, for rendering.
    pub fn snapshot(&self) -> BrowserState {
        self.lock().clone()
    }

    /// Marks `action` in flight. `None` if it already is.
    pub(crate) fn begin(&self, action: Action) -> Option<BusyGuard<'_>> {
        if self.lock().busy.acquire(action) {
            Some(BusyGuard {
                session: self,
                action,
            })
        } else {
            None
        }
    }
}

/// Clears the busy flag when dropped, whichever way the action ends.
#[derive(Debug)]
pub(crate) struct BusyGuard<'a> {
    session: &'a BrowserSession,
    action: Action,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.session.lock().busy.release(self.action);
    }
}
