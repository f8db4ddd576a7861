use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, form, get, htmx_post, make_app, start_session, tower_a, Call, FakeBackend,
};
use astra::{Body, Request};
use http::Method;
use serde_json::json;
use std::sync::Arc;

/// App with a session that has searched and found Tower A.
fn searched_app(fake: &Arc<FakeBackend>) -> (crate::app::App, String) {
    let app = make_app(fake.clone());
    let token = start_session(&app);
    handle(
        htmx_post("/search", &form(&[("keyword", "Gangnam")]), &token),
        &app,
    )
    .unwrap();
    (app, token)
}

fn edit_request(uri: &str, token: &str, prompt: &str, encoded: bool) -> Request {
    let mut builder = http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("HX-Request", "true")
        .header("HX-Prompt", prompt)
        .header("Cookie", format!("session={token}"));
    if encoded {
        builder = builder.header("HX-Prompt-URI-AutoEncoded", "true");
    }
    builder.body(Body::empty()).unwrap()
}

#[test]
fn fetch_renders_numbered_rows() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    fake.set_records(vec![json!({"아파트명": "Tower A", "거래가격": "10억"})]);
    let (app, token) = searched_app(&fake);

    let resp = handle(
        htmx_post(
            "/listings",
            &form(&[("complex_no", "123"), ("trade_type", "A1")]),
            &token,
        ),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("<td class=\"row-number\">1</td>"));
    assert!(body.contains(">Tower A</td>"));
    assert!(body.contains(">10억</td>"));
    assert!(body.contains("총 1개의 매물을 수집했습니다."));
    assert!(body.contains("<option value=\"123\" selected>Tower A (123)</option>"));
    assert!(body.contains("<option value=\"A1\" selected>매매</option>"));
    assert_eq!(
        fake.calls().last(),
        Some(&Call::Fetch("123".into(), "A1".into()))
    );
}

#[test]
fn fetch_without_selection_is_rejected_in_page() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let (app, token) = searched_app(&fake);

    let resp = handle(htmx_post("/listings", "complex_no=&trade_type=", &token), &app).unwrap();

    assert!(body_string(resp).contains("단지를 선택하세요."));
    assert_eq!(fake.calls(), vec![Call::Search("Gangnam".into())]);
}

#[test]
fn query_style_fetch_is_accepted() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    fake.set_records(vec![json!({"아파트명": "Tower A"})]);
    let (app, token) = searched_app(&fake);

    let resp = handle(get("/listings?complex_no=123&trade_type=B1", &token), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("<td class=\"row-number\">1</td>"));
    assert_eq!(
        fake.calls().last(),
        Some(&Call::Fetch("123".into(), "B1".into()))
    );
}

#[test]
fn prompt_edit_updates_cell() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    fake.set_records(vec![json!({"아파트명": "Tower A", "거래가격": "10억"})]);
    let (app, token) = searched_app(&fake);
    handle(
        htmx_post("/listings", &form(&[("complex_no", "123")]), &token),
        &app,
    )
    .unwrap();

    let resp = handle(
        edit_request("/table/cell?row=0&col=3", &token, "12/20", false),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains(">12/20</td>"));
}

#[test]
fn encoded_prompt_is_decoded() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    fake.set_records(vec![json!({"아파트명": "Tower A", "거래가격": "10억"})]);
    let (app, token) = searched_app(&fake);
    handle(
        htmx_post("/listings", &form(&[("complex_no", "123")]), &token),
        &app,
    )
    .unwrap();

    // "9억 5천" as htmx sends it.
    let resp = handle(
        edit_request(
            "/table/cell?row=0&col=5",
            &token,
            "9%EC%96%B5%205%EC%B2%9C",
            true,
        ),
        &app,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.contains(">9억 5천</td>"));
    assert!(!body.contains(">10억</td>"));
}

#[test]
fn edit_without_coordinates_is_bad_request() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let (app, token) = searched_app(&fake);

    let err = handle(edit_request("/table/cell?row=0", &token, "x", false), &app).unwrap_err();

    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(err.status(), 400);
}

#[test]
fn malformed_edit_from_new_visitor_leaves_no_session_behind() {
    let app = make_app(Arc::new(FakeBackend::default()));

    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/table/cell?row=abc&col=1")
        .header("HX-Request", "true")
        .header("HX-Prompt", "x")
        .body(Body::empty())
        .unwrap();
    let err = handle(req, &app).unwrap_err();

    assert_eq!(err.status(), 400);
    assert_eq!(app.sessions.len(), 0);
}
