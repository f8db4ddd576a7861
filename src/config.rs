use crate::backend::{EndpointStyle, ExportMode};
use std::collections::HashMap;
use std::fs;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "listing_browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub backend_url: String,
    pub endpoint_style: EndpointStyle,
    /// `None` means "whatever the endpoint style supports".
    pub export_mode: Option<ExportMode>,
    pub request_timeout_secs: u64,
    pub max_workers: usize,
    pub session_idle_secs: u64,
    pub max_sessions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".into(),
            backend_url: "http://127.0.0.1:5000".into(),
            endpoint_style: EndpointStyle::Form,
            export_mode: None,
            request_timeout_secs: 120,
            max_workers: 8,
            session_idle_secs: 60 * 60 * 24,
            max_sessions: 10_000,
        }
    }
}

impl Settings {
    pub fn export_mode(&self) -> ExportMode {
        self.export_mode
            .unwrap_or_else(|| self.endpoint_style.default_export_mode())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    /// Applies `key = value` pairs; unknown keys and bad values are logged
    /// and skipped.
    fn apply<K: AsRef<str>>(&mut self, source: &str, pairs: impl IntoIterator<Item = (K, String)>) {
        for (key, value) in pairs {
            let key = key.as_ref();
            match key {
                "bind_addr" => self.bind_addr = value,
                "backend_url" => self.backend_url = value,
                "endpoint_style" => {
                    if let Some(v) = parse_setting(source, key, &value) {
                        self.endpoint_style = v;
                    }
                }
                "export_mode" => {
                    if let Some(v) = parse_setting(source, key, &value) {
                        self.export_mode = Some(v);
                    }
                }
                "request_timeout_secs" => {
                    if let Some(v) = parse_setting(source, key, &value) {
                        self.request_timeout_secs = v;
                    }
                }
                "max_workers" => {
                    if let Some(v) = parse_setting(source, key, &value) {
                        self.max_workers = v;
                    }
                }
                "session_idle_secs" => {
                    if let Some(v) = parse_setting(source, key, &value) {
                        self.session_idle_secs = v;
                    }
                }
                "max_sessions" => {
                    if let Some(v) = parse_setting(source, key, &value) {
                        self.max_sessions = v;
                    }
                }
                other => warn!(source, key = other, "unknown setting ignored"),
            }
        }
    }

    fn apply_file(&mut self, raw: &str) {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(table) => {
                let pairs = table.into_iter().map(|(k, v)| {
                    let value = match v {
                        toml::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (k, value)
                });
                self.apply(CONFIG_FILE, pairs);
            }
            Err(e) => warn!(error = %e, "invalid {CONFIG_FILE}, skipped"),
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        const ENV_KEYS: [(&str, &str); 8] = [
            ("LISTING_BIND_ADDR", "bind_addr"),
            ("LISTING_BACKEND_URL", "backend_url"),
            ("LISTING_ENDPOINT_STYLE", "endpoint_style"),
            ("LISTING_EXPORT_MODE", "export_mode"),
            ("LISTING_REQUEST_TIMEOUT_SECS", "request_timeout_secs"),
            ("LISTING_MAX_WORKERS", "max_workers"),
            ("LISTING_SESSION_IDLE_SECS", "session_idle_secs"),
            ("LISTING_MAX_SESSIONS", "max_sessions"),
        ];

        let pairs: Vec<(&str, String)> = ENV_KEYS
            .iter()
            .filter_map(|(var, key)| lookup(var).map(|v| (*key, v)))
            .collect();
        self.apply("environment", pairs);
    }
}

fn parse_setting<T: FromStr>(source: &str, key: &str, raw: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(source, key, value = raw, error = %e, "invalid setting ignored");
            None
        }
    }
}

/// Defaults, then `listing_browser.toml` if present, then `LISTING_*`
/// environment variables.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        info!("reading {CONFIG_FILE}");
        settings.apply_file(&raw);
    }

    settings.apply_env(|var| std::env::var(var).ok());
    settings
}
