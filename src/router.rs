use crate::app::App;
use crate::browser::{ActionError, BrowserSession};
use crate::errors::ServerError;
use crate::responses::{css_response, html_response, html_response_with_status, xlsx_response};
use crate::responses::ResultResp;
use crate::sessions::{session_token, set_session_cookie};
use crate::templates;
use astra::Request;
use http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::HeaderValue;
use std::collections::HashMap;
use std::io::Read;
use tracing::debug;

const MAIN_CSS: &str = include_str!("../static/main.css");

// Form bodies here are a handful of short fields.
const MAX_FORM_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Page,
    Search,
    Listings,
    EditCell,
    Export,
}

/// A routed request with its parameters decoded.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Page,
    Search {
        keyword: String,
    },
    Listings {
        complex_no: String,
        trade_type: String,
    },
    EditCell {
        row: usize,
        col: usize,
        value: Option<String>,
    },
    Export,
}

fn route(method: &str, path: &str) -> Option<Route> {
    match (method, path) {
        ("GET", "/") => Some(Route::Page),
        // Both backend conventions are mirrored: form POST and query GET.
        ("GET", "/search") | ("POST", "/search") => Some(Route::Search),
        ("GET", "/listings") | ("POST", "/listings") => Some(Route::Listings),
        ("POST", "/table/cell") => Some(Route::EditCell),
        ("POST", "/export") => Some(Route::Export),
        _ => None,
    }
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    debug!(%method, %path, "request");

    if method == "GET" && path == "/static/main.css" {
        return css_response(MAIN_CSS);
    }

    let route = route(&method, &path).ok_or(ServerError::NotFound)?;

    // A malformed request is refused before it can create a session.
    let htmx = req.headers().contains_key("hx-request");
    let prompt = prompt_value(&req);
    let params = read_params(&mut req)?;
    let command = command(route, params, prompt)?;

    let token = req
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_token)
        .map(str::to_owned);
    let resolved = app.sessions.resolve(token.as_deref());
    let session = &resolved.session;

    let mut resp = match command {
        Command::Page => html_response(templates::browser_page(&session.snapshot())),

        Command::Search { keyword } => {
            // The outcome is already recorded as the session's status line.
            let _ = app.browser.search_region(session, &keyword);
            render_after_action(session, htmx)
        }

        Command::Listings {
            complex_no,
            trade_type,
        } => {
            let _ = app.browser.fetch_listings(session, &complex_no, &trade_type);
            render_after_action(session, htmx)
        }

        Command::EditCell { row, col, value } => {
            // A dismissed prompt never reaches us; a missing value just re-renders.
            if let Some(value) = value {
                let _ = app.browser.edit_cell(session, row, col, &value);
            }
            render_after_action(session, htmx)
        }

        Command::Export => match app.browser.export_to_spreadsheet(session) {
            Ok(download) => xlsx_response(download.bytes, download.filename),
            Err(err) => {
                let status = match err {
                    ActionError::Invalid(_) => 400,
                    ActionError::Busy(_) => 409,
                    ActionError::Backend(_) => 502,
                };
                html_response_with_status(status, templates::browser_page(&session.snapshot()))
            }
        },
    }?;

    if let Some(token) = resolved.new_token {
        let cookie = HeaderValue::from_str(&set_session_cookie(&token))
            .map_err(|_| ServerError::InternalError)?;
        resp.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(resp)
}

fn command(
    route: Route,
    mut params: HashMap<String, String>,
    prompt: Option<String>,
) -> Result<Command, ServerError> {
    Ok(match route {
        Route::Page => Command::Page,
        Route::Search => Command::Search {
            keyword: take(&mut params, "keyword"),
        },
        Route::Listings => Command::Listings {
            complex_no: take(&mut params, "complex_no"),
            trade_type: take(&mut params, "trade_type"),
        },
        Route::EditCell => Command::EditCell {
            row: index_param(&params, "row")?,
            col: index_param(&params, "col")?,
            value: params.remove("value").or(prompt),
        },
        Route::Export => Command::Export,
    })
}

fn take(params: &mut HashMap<String, String>, name: &str) -> String {
    params.remove(name).unwrap_or_default()
}

/// htmx swaps the workspace fragment; plain form posts get the whole page.
fn render_after_action(session: &BrowserSession, htmx: bool) -> ResultResp {
    let state = session.snapshot();
    if htmx {
        html_response(templates::workspace(&state))
    } else {
        html_response(templates::browser_page(&state))
    }
}

/// Query string plus, for url-encoded POSTs, the form body. Body values win.
fn read_params(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut params: HashMap<String, String> = req
        .uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();

    let is_form = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    if req.method().as_str() == "POST" && is_form {
        let mut body = Vec::new();
        req.body_mut()
            .reader()
            .take(MAX_FORM_BYTES)
            .read_to_end(&mut body)
            .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;

        params.extend(url::form_urlencoded::parse(&body).into_owned());
    }

    Ok(params)
}

/// Value typed into an `hx-prompt`. htmx percent-encodes it when the raw
/// text is not a valid header value, and says so in a second header.
fn prompt_value(req: &Request) -> Option<String> {
    let headers = req.headers();
    let raw = headers.get("hx-prompt")?;
    let raw = String::from_utf8_lossy(raw.as_bytes()).into_owned();

    let encoded = headers
        .get("hx-prompt-uri-autoencoded")
        .map(|v| v.as_bytes() == b"true")
        .unwrap_or(false);

    if encoded {
        let pair = format!("v={raw}");
        url::form_urlencoded::parse(pair.as_bytes())
            .next()
            .map(|(_, v)| v.into_owned())
    } else {
        Some(raw)
    }
}

fn index_param(params: &HashMap<String, String>, name: &str) -> Result<usize, ServerError> {
    params
        .get(name)
        .ok_or_else(|| ServerError::BadRequest(format!("missing '{name}'")))?
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("'{name}' must be a non-negative integer")))
}
