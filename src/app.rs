use crate::backend::{BackendError, HttpBackend, ListingBackend};
use crate::browser::ListingBrowser;
use crate::config::Settings;
use crate::sessions::SessionStore;
use std::sync::Arc;
use std::time::Duration;

/// Everything a request handler needs.
pub struct App {
    pub browser: ListingBrowser,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(
        backend: Arc<dyn ListingBackend>,
        session_idle: Duration,
        max_sessions: usize,
    ) -> Self {
        Self {
            browser: ListingBrowser::new(backend),
            sessions: SessionStore::new(session_idle, max_sessions),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, BackendError> {
        let backend = HttpBackend::new(
            &settings.backend_url,
            settings.endpoint_style,
            settings.export_mode(),
            settings.request_timeout(),
        )?;

        Ok(Self::new(
            Arc::new(backend),
            settings.session_idle(),
            settings.max_sessions,
        ))
    }
}
