use crate::router::handle;
use crate::tests::utils::{
    body_bytes, body_string, form, htmx_post, make_app, plain_post, start_session, tower_a, Call,
    Failure, FakeBackend,
};
use serde_json::json;
use std::sync::Arc;

/// App whose session has one listing in its table.
fn loaded_app(fake: &Arc<FakeBackend>) -> (crate::app::App, String) {
    fake.set_records(vec![json!({"아파트명": "Tower A", "거래가격": "10억"})]);
    let app = make_app(fake.clone());
    let token = start_session(&app);
    handle(
        htmx_post("/search", &form(&[("keyword", "Gangnam")]), &token),
        &app,
    )
    .unwrap();
    handle(
        htmx_post("/listings", &form(&[("complex_no", "123")]), &token),
        &app,
    )
    .unwrap();
    (app, token)
}

#[test]
fn export_downloads_workbook() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let (app, token) = loaded_app(&fake);

    let resp = handle(plain_post("/export", "", &token), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let headers = resp.headers();
    assert_eq!(
        headers.get("Content-Disposition").unwrap(),
        "attachment; filename=\"real_estate_data.xlsx\""
    );
    assert_eq!(
        headers.get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert!(body_bytes(resp).starts_with(b"PK"));
    assert_eq!(fake.calls().last(), Some(&Call::Export(1)));
}

#[test]
fn export_with_empty_table_returns_page() {
    let fake = Arc::new(FakeBackend::default());
    let app = make_app(fake.clone());
    let token = start_session(&app);

    let resp = handle(plain_post("/export", "", &token), &app).unwrap();

    assert_eq!(resp.status(), 400);
    let body = body_string(resp);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("다운로드할 데이터가 없습니다."));
    assert!(fake.calls().is_empty());
}

#[test]
fn export_failure_returns_page_with_bad_gateway() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let (app, token) = loaded_app(&fake);
    fake.fail_with(Some(Failure::Network));

    let resp = handle(plain_post("/export", "", &token), &app).unwrap();

    assert_eq!(resp.status(), 502);
    let body = body_string(resp);
    assert!(body.contains("엑셀 다운로드 중 오류가 발생했습니다."));
    // The table is still there to retry with.
    assert!(body.contains(">10억</td>"));
}

#[test]
fn export_requires_a_known_session() {
    let fake = Arc::new(FakeBackend::with_complexes(vec![tower_a()]));
    let (app, _token) = loaded_app(&fake);

    let resp = handle(plain_post("/export", "", "someone-else"), &app).unwrap();

    assert_eq!(resp.status(), 400);
    assert!(resp.headers().get("Set-Cookie").is_some());
    assert!(!fake.calls().contains(&Call::Export(1)));
}
