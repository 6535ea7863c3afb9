//! Integration Test: ログアウト

use crate::support::gate::{create_test_gate, TEST_EMAIL, TEST_PASSWORD};
use crate::support::http::{
    assert_redirect_to, body_string, get, login, post_form, session_cookie, set_cookie_header,
};
use axum::http::StatusCode;

#[tokio::test]
async fn logout_destroys_session_and_clears_cookie() {
    let gate = create_test_gate();
    let response = login(&gate.app, "/", TEST_EMAIL, TEST_PASSWORD, None).await;
    let cookie = session_cookie(&response).unwrap();

    let logout = post_form(&gate.app, "/", "action=logout", Some(&cookie)).await;
    assert_redirect_to(&logout, "/");
    let cleared = set_cookie_header(&logout).expect("cookie cleared");
    assert!(cleared.starts_with("dashgate_session=;"));
    assert!(cleared.contains("Max-Age=0"));

    // 古いCookieはもう使えない
    let after = get(&gate.app, "/", Some(&cookie)).await;
    assert_eq!(after.status(), StatusCode::OK);
    assert!(session_cookie(&after).is_some());
    let body = body_string(after).await;
    assert!(body.contains(r#"name="password""#));
    assert!(!body.contains("<iframe"));
}

#[tokio::test]
async fn logout_wins_over_credentials_in_same_form() {
    let gate = create_test_gate();

    let body = format!(
        "email={}&password={}&action=logout",
        "ygemii%40gmail.com", TEST_PASSWORD
    );
    let response = post_form(&gate.app, "/", &body, None).await;
    assert_redirect_to(&response, "/");
    assert!(gate.audit_log().is_empty());
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let gate = create_test_gate();

    let response = post_form(&gate.app, "/", "action=logout", None).await;
    assert_redirect_to(&response, "/");
}

#[tokio::test]
async fn login_again_after_logout_writes_second_audit_line() {
    let gate = create_test_gate();

    let first = login(&gate.app, "/", TEST_EMAIL, TEST_PASSWORD, None).await;
    let cookie = session_cookie(&first).unwrap();
    post_form(&gate.app, "/", "action=logout", Some(&cookie)).await;

    let second = login(&gate.app, "/", TEST_EMAIL, TEST_PASSWORD, None).await;
    assert_redirect_to(&second, "/");
    assert_eq!(gate.audit_lines().len(), 2);
}
