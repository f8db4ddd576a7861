// src/sessions/store.rs
use crate::browser::BrowserSession;
use crate::sessions::token::{generate_session_token, hash_token};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on how often the whole table is swept for idle entries.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

struct Entry {
    session: BrowserSession,
    last_seen: Instant,
}

struct Table {
    entries: HashMap<[u8; 32], Entry>,
    last_prune: Instant,
}

/// In-memory session table keyed by the SHA-256 of the cookie token.
///
/// Sessions idle for longer than `idle_timeout` are dropped. When the table
/// holds `max_sessions` entries, a new session evicts the least recently
/// seen one.
pub struct SessionStore {
    table: Mutex<Table>,
    idle_timeout: Duration,
    max_sessions: usize,
}

/// The session a request belongs to. `new_token` is set when a fresh
/// session was created and the cookie has to be (re)issued.
pub struct ResolvedSession {
    pub session: BrowserSession,
    pub new_token: Option<String>,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, max_sessions: usize) -> Self {
        Self {
            table: Mutex::new(Table {
                entries: HashMap::new(),
                last_prune: Instant::now(),
            }),
            idle_timeout,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn resolve(&self, token: Option<&str>) -> ResolvedSession {
        self.resolve_at(token, Instant::now())
    }

    fn resolve_at(&self, token: Option<&str>, now: Instant) -> ResolvedSession {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);

        if now.saturating_duration_since(table.last_prune) >= PRUNE_INTERVAL.min(self.idle_timeout)
        {
            self.prune(&mut table, now);
        }

        if let Some(token) = token {
            let key = hash_token(token);
            if let Some(entry) = table.entries.get_mut(&key) {
                if self.is_live(entry, now) {
                    entry.last_seen = now;
                    return ResolvedSession {
                        session: entry.session.clone(),
                        new_token: None,
                    };
                }
                table.entries.remove(&key);
            }
        }

        if table.entries.len() >= self.max_sessions {
            self.prune(&mut table, now);
        }
        while table.entries.len() >= self.max_sessions {
            let oldest = table
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(key, _)| *key);
            match oldest {
                Some(key) => {
                    table.entries.remove(&key);
                    debug!("session table full, least recently seen session evicted");
                }
                None => break,
            }
        }

        let raw_token = generate_session_token();
        let session = BrowserSession::new();
        table.entries.insert(
            hash_token(&raw_token),
            Entry {
                session: session.clone(),
                last_seen: now,
            },
        );
        debug!(sessions = table.entries.len(), "session created");

        ResolvedSession {
            session,
            new_token: Some(raw_token),
        }
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_seen) < self.idle_timeout
    }

    fn prune(&self, table: &mut Table, now: Instant) {
        let before = table.entries.len();
        table.entries.retain(|_, e| self.is_live(e, now));
        table.last_prune = now;
        if table.entries.len() < before {
            debug!(pruned = before - table.entries.len(), "idle sessions dropped");
        }
    }

    pub fn len(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}
