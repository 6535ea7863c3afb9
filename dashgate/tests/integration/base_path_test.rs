//! Integration Test: ベースパス配下へのマウント

use crate::support::gate::{create_test_gate_with, TEST_EMAIL, TEST_PASSWORD};
use crate::support::http::{
    assert_redirect_to, body_string, get, login, post_form, session_cookie, set_cookie_header,
};
use axum::http::StatusCode;

fn mounted_gate() -> crate::support::gate::TestGate {
    create_test_gate_with(|config| config.with_base_path("reports/risk"))
}

#[tokio::test]
async fn gate_is_served_only_at_base_path() {
    let gate = mounted_gate();

    let response = get(&gate.app, "/reports/risk", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie_header(&response).unwrap();
    assert!(cookie.contains("Path=/reports/risk"));
    let body = body_string(response).await;
    assert!(body.contains(r#"action="/reports/risk""#));

    let root = get(&gate.app, "/", None).await;
    assert_eq!(root.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirects_point_back_to_base_path() {
    let gate = mounted_gate();

    let response = login(&gate.app, "/reports/risk", TEST_EMAIL, TEST_PASSWORD, None).await;
    assert_redirect_to(&response, "/reports/risk");
    let cookie = session_cookie(&response).unwrap();

    let logout = post_form(&gate.app, "/reports/risk", "action=logout", Some(&cookie)).await;
    assert_redirect_to(&logout, "/reports/risk");
}

#[tokio::test]
async fn page_title_is_configurable_and_escaped() {
    let gate = create_test_gate_with(|mut config| {
        config.page_title = "Risk & Ops <Board>".to_string();
        config
    });

    let body = body_string(get(&gate.app, "/", None).await).await;
    assert!(body.contains("<title>Risk &amp; Ops &lt;Board&gt;</title>"));
}
