use crate::router::handle;
use crate::tests::utils::{
    body_string, form, get, htmx_post, make_app, plain_post, start_session, tower_a, Call,
    Failure, FakeBackend,
};
use std::sync::Arc;

#[test]
fn htmx_search_swaps_workspace_with_complexes() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let app = make_app(fake.clone());
    let token = start_session(&app);

    let resp = handle(
        htmx_post("/search", &form(&[("keyword", "Gangnam")]), &token),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.starts_with("<section id=\"workspace\""));
    assert!(!body.contains("<html"));
    assert!(body.contains("<option value=\"123\">Tower A (123)</option>"));
    assert!(body.contains("1개의 단지를 찾았습니다."));
    assert!(!body.contains("name=\"complex_no\" disabled"));
    assert_eq!(fake.calls(), vec![Call::Search("Gangnam".into())]);
}

#[test]
fn korean_keyword_is_decoded() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let app = make_app(fake.clone());
    let token = start_session(&app);

    handle(
        htmx_post("/search", &form(&[("keyword", "강남구")]), &token),
        &app,
    )
    .unwrap();

    assert_eq!(fake.calls(), vec![Call::Search("강남구".into())]);
}

#[test]
fn query_style_search_is_accepted() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let app = make_app(fake.clone());
    let token = start_session(&app);

    let resp = handle(get("/search?keyword=Gangnam", &token), &app).unwrap();

    assert_eq!(resp.status(), 200);
    // Not an htmx request, so the whole page comes back.
    let body = body_string(resp);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("value=\"Gangnam\""));
    assert!(body.contains("Tower A (123)"));
}

#[test]
fn plain_form_post_gets_full_page() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let app = make_app(fake);
    let token = start_session(&app);

    let resp = handle(
        plain_post("/search", &form(&[("keyword", "Gangnam")]), &token),
        &app,
    )
    .unwrap();

    let body = body_string(resp);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Tower A (123)"));
}

#[test]
fn empty_keyword_shows_message_without_calling_backend() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let app = make_app(fake.clone());
    let token = start_session(&app);

    let resp = handle(htmx_post("/search", "keyword=", &token), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("지역명을 입력하세요."));
    assert!(body.contains("status-error"));
    assert!(fake.calls().is_empty());
}

#[test]
fn backend_error_is_rendered_in_status_line() {
    let fake = Arc::new(FakeBackend::default());
    fake.fail_with(Some(Failure::Server("잘못된 지역명")));
    let app = make_app(fake);
    let token = start_session(&app);

    let resp = handle(
        htmx_post("/search", &form(&[("keyword", "Gangnam")]), &token),
        &app,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("오류: 잘못된 지역명"));
}

#[test]
fn sessions_do_not_share_results() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let app = make_app(fake);
    let alice = start_session(&app);
    let bob = start_session(&app);

    handle(
        htmx_post("/search", &form(&[("keyword", "Gangnam")]), &alice),
        &app,
    )
    .unwrap();

    let bob_page = body_string(handle(get("/", &bob), &app).unwrap());
    assert!(!bob_page.contains("Tower A (123)"));

    let alice_page = body_string(handle(get("/", &alice), &app).unwrap());
    assert!(alice_page.contains("Tower A (123)"));
}
