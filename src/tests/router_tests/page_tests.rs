use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, get, make_app, start_session, FakeBackend};
use astra::Body;
use http::Method;
use std::sync::Arc;

#[test]
fn first_visit_renders_page_and_issues_cookie() {
    let app = make_app(Arc::new(FakeBackend::default()));

    let req = http::Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).unwrap();

    assert_eq!(resp.status(), 200);
    let cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_string(resp);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("id=\"search-form\""));
    assert!(body.contains("id=\"data-table\""));
    // Nothing searched yet, so the selector is disabled.
    assert!(body.contains("<select id=\"complex\" name=\"complex_no\" disabled"));
}

#[test]
fn known_cookie_is_not_reissued() {
    let app = make_app(Arc::new(FakeBackend::default()));
    let token = start_session(&app);

    let resp = handle(get("/", &token), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert_eq!(app.sessions.len(), 1);
}

#[test]
fn stylesheet_is_served() {
    let app = make_app(Arc::new(FakeBackend::default()));

    let resp = handle(get("/static/main.css", "none"), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers().get("Content-Type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("text/css"));
    assert!(body_string(resp).contains(".loading-overlay"));
}

#[test]
fn unknown_path_is_not_found() {
    let app = make_app(Arc::new(FakeBackend::default()));

    let err = handle(get("/admin", "none"), &app).unwrap_err();

    assert!(matches!(err, ServerError::NotFound));
    assert_eq!(err.status(), 404);
    assert_eq!(app.sessions.len(), 0);
}
