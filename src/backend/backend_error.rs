use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response that carried no `error` message.
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// The backend's own `{"error": ...}` message, surfaced verbatim.
    #[error("{0}")]
    Server(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl BackendError {
    /// Message the backend itself wants shown to the user, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Server(msg) => Some(msg),
            _ => None,
        }
    }
}
