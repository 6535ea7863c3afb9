//! Integration Test: 監査ログ
//!
//! ログイン成功ごとに1行、リダイレクト前に追記されること

use crate::support::gate::{create_test_gate, create_test_gate_with, TEST_EMAIL, TEST_PASSWORD};
use crate::support::http::{assert_redirect_to, body_string, get, login, session_cookie};
use chrono::{Local, NaiveDateTime, SubsecRound};

#[tokio::test]
async fn successful_login_appends_one_well_formed_line() {
    let gate = create_test_gate();
    let before = Local::now().naive_local().trunc_subsecs(0);

    let response = login(&gate.app, "/", TEST_EMAIL, TEST_PASSWORD, None).await;
    assert_redirect_to(&response, "/");

    // リダイレクトが返った時点で書き込み済み
    let lines = gate.audit_lines();
    assert_eq!(lines.len(), 1);
    assert!(gate.audit_log().ends_with('\n'));

    let fields: Vec<&str> = lines[0].split(" | ").collect();
    assert_eq!(fields.len(), 4);
    let timestamp = NaiveDateTime::parse_from_str(fields[0], "%Y-%m-%d %H:%M:%S")
        .expect("timestamp format");
    assert!(timestamp >= before);
    assert_eq!(fields[1], "SUCCESS");
    assert_eq!(fields[2], "USER: ygemii@gmail.com");
    // oneshotでは接続元アドレスがない
    assert_eq!(fields[3], "IP: N/A");
}

#[tokio::test]
async fn failed_login_writes_nothing() {
    let gate = create_test_gate();

    login(&gate.app, "/", "x@y.com", "wrong", None).await;
    login(&gate.app, "/", TEST_EMAIL, "wrong", None).await;

    assert!(!gate.log_path.exists());
}

#[tokio::test]
async fn forwarded_ip_is_logged_only_when_proxy_is_trusted() {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let body = format!("email=ygemii%40gmail.com&password={}", TEST_PASSWORD);
    let request = || {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::from(body.clone()))
            .unwrap()
    };

    let untrusted = create_test_gate();
    untrusted.app.clone().oneshot(request()).await.unwrap();
    assert!(untrusted.audit_log().ends_with("| IP: N/A\n"));

    let trusted = create_test_gate_with(|mut config| {
        config.trust_proxy = true;
        config
    });
    trusted.app.clone().oneshot(request()).await.unwrap();
    assert!(trusted.audit_log().ends_with("| IP: 203.0.113.7\n"));
}

#[tokio::test]
async fn audit_failure_does_not_block_login() {
    let dir = tempfile::tempdir().unwrap();
    // ディレクトリを監査ログのパスに指定して書き込みを失敗させる
    let unwritable = dir.path().to_path_buf();
    let gate = create_test_gate_with(|config| config.with_audit_log_path(&unwritable));

    let response = login(&gate.app, "/", TEST_EMAIL, TEST_PASSWORD, None).await;
    assert_redirect_to(&response, "/");
    let cookie = session_cookie(&response).unwrap();

    let body = body_string(get(&gate.app, "/", Some(&cookie)).await).await;
    assert!(body.contains("<iframe"));
}

#[tokio::test]
async fn concurrent_logins_never_interleave_lines() {
    let gate = create_test_gate();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let app = gate.app.clone();
        handles.push(tokio::spawn(async move {
            login(&app, "/", TEST_EMAIL, TEST_PASSWORD, None).await
        }));
    }
    for handle in handles {
        assert_redirect_to(&handle.await.unwrap(), "/");
    }

    let lines = gate.audit_lines();
    assert_eq!(lines.len(), 16);
    for line in lines {
        assert!(line.ends_with(" | SUCCESS | USER: ygemii@gmail.com | IP: N/A"));
    }
}
