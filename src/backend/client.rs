// client.rs
use crate::backend::models::{Complex, ExportRequest, ExportRow, ListingRecord};
use crate::backend::{BackendError, ListingBackend};
use crate::spreadsheets::build_listings_workbook;
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("listing_browser/", env!("CARGO_PKG_VERSION"));

/// Which of the backend's two request conventions to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStyle {
    /// `POST /search`, `POST /fetch_data` with form bodies.
    Form,
    /// `GET /api/search_region`, `GET /api/get_real_estate_data` with query strings.
    Query,
}

impl EndpointStyle {
    fn search_path(self) -> &'static str {
        match self {
            EndpointStyle::Form => "search",
            EndpointStyle::Query => "api/search_region",
        }
    }

    fn listings_path(self) -> &'static str {
        match self {
            EndpointStyle::Form => "fetch_data",
            EndpointStyle::Query => "api/get_real_estate_data",
        }
    }

    /// Only the form-style backend ships a spreadsheet endpoint.
    pub fn default_export_mode(self) -> ExportMode {
        match self {
            EndpointStyle::Form => ExportMode::Backend,
            EndpointStyle::Query => ExportMode::Local,
        }
    }
}

impl FromStr for EndpointStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" | "post" => Ok(EndpointStyle::Form),
            "query" | "get" => Ok(EndpointStyle::Query),
            other => Err(format!("unknown endpoint style '{other}'")),
        }
    }
}

/// Where the spreadsheet bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// `POST /download_excel` with the rows as JSON.
    Backend,
    /// Built in-process from the same rows.
    Local,
}

impl FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" | "remote" => Ok(ExportMode::Backend),
            "local" => Ok(ExportMode::Local),
            other => Err(format!("unknown export mode '{other}'")),
        }
    }
}

pub struct HttpBackend {
    client: Client,
    base_url: Url,
    style: EndpointStyle,
    export_mode: ExportMode,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        style: EndpointStyle,
        export_mode: ExportMode,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| BackendError::Config(format!("invalid backend url '{base_url}': {e}")))?;

        // Url::join drops the last path segment unless it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            style,
            export_mode,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Config(format!("invalid endpoint path '{path}': {e}")))
    }

    fn send_for_items(
        &self,
        path: &str,
        params: &[(&str, &str)],
        wrapper_key: &str,
    ) -> Result<Vec<Value>, BackendError> {
        let url = self.endpoint(path)?;
        debug!(%url, style = ?self.style, "backend request");

        let request = match self.style {
            EndpointStyle::Form => self.client.post(url).form(params),
            EndpointStyle::Query => self.client.get(url).query(params),
        };

        let resp = request
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let body = read_json(resp)?;
        unwrap_items(body, wrapper_key)
    }
}

impl ListingBackend for HttpBackend {
    fn search_region(&self, keyword: &str) -> Result<Vec<Complex>, BackendError> {
        let items =
            self.send_for_items(self.style.search_path(), &[("keyword", keyword)], "complexes")?;
        Ok(items.iter().filter_map(Complex::from_value).collect())
    }

    fn fetch_listings(
        &self,
        complex_no: &str,
        trade_type: &str,
    ) -> Result<Vec<ListingRecord>, BackendError> {
        let items = self.send_for_items(
            self.style.listings_path(),
            &[("complex_no", complex_no), ("trade_type", trade_type)],
            "data",
        )?;

        items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(ListingRecord::from(map)),
                other => Err(BackendError::UnexpectedShape(format!(
                    "listing is not an object: {other}"
                ))),
            })
            .collect()
    }

    fn export_spreadsheet(&self, rows: &[ExportRow]) -> Result<Vec<u8>, BackendError> {
        if self.export_mode == ExportMode::Local {
            return build_listings_workbook(rows)
                .map_err(|e| BackendError::Spreadsheet(e.to_string()));
        }

        let url = self.endpoint("download_excel")?;
        debug!(%url, rows = rows.len(), "spreadsheet export request");

        let resp = self
            .client
            .post(url)
            .json(&ExportRequest { data: rows })
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        // Read the whole body before handing anything back, so a dropped
        // connection never turns into a truncated file.
        let bytes = resp
            .bytes()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Decode a JSON body, turning `{"error": ...}` and bare non-2xx statuses
/// into errors.
fn read_json(resp: Response) -> Result<Value, BackendError> {
    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| BackendError::Network(e.to_string()))?;

    match serde_json::from_str::<Value>(&text) {
        Ok(body) => {
            if let Some(msg) = body.get("error").and_then(Value::as_str) {
                return Err(BackendError::Server(msg.to_string()));
            }
            if !status.is_success() {
                return Err(BackendError::Status(status.as_u16()));
            }
            Ok(body)
        }
        Err(_) if !status.is_success() => Err(BackendError::Status(status.as_u16())),
        Err(e) => Err(BackendError::JsonParse(e.to_string())),
    }
}

/// Accepts a bare array, `{wrapper_key: [...]}`, or `{"message": ...}`
/// (the backend's way of saying "nothing found").
fn unwrap_items(body: Value, wrapper_key: &str) -> Result<Vec<Value>, BackendError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(wrapper_key) {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(BackendError::UnexpectedShape(format!(
                "'{wrapper_key}' is not an array: {other}"
            ))),
            None if map.contains_key("message") => Ok(Vec::new()),
            None => Err(BackendError::UnexpectedShape(format!(
                "'{wrapper_key}' missing"
            ))),
        },
        other => Err(BackendError::UnexpectedShape(format!(
            "expected array or object, got {other}"
        ))),
    }
}
