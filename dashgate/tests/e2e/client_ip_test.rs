use std::net::SocketAddr;

use crate::support::gate::{create_test_gate, TestGate, TEST_EMAIL, TEST_PASSWORD};
use reqwest::{header, redirect, Client, StatusCode};
use tokio::net::TcpListener;

/// ConnectInfo付きで実サーバーを起動する
async fn spawn_gate(gate: &TestGate) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = gate.app.clone();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn login_over_tcp_records_peer_address() {
    let gate = create_test_gate();
    let addr = spawn_gate(&gate).await;
    let client = client();

    let response = client
        .post(format!("http://{addr}/"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(format!(
            "email=ygemii%40gmail.com&password={}",
            TEST_PASSWORD
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );

    let log = gate.audit_log();
    assert!(
        log.ends_with(&format!("| SUCCESS | USER: {TEST_EMAIL} | IP: 127.0.0.1\n")),
        "unexpected audit log: {log}"
    );
}

#[tokio::test]
async fn session_cookie_round_trips_over_tcp() {
    let gate = create_test_gate();
    let addr = spawn_gate(&gate).await;
    let client = client();

    let response = client
        .post(format!("http://{addr}/"))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(format!(
            "email=ygemii%40gmail.com&password={}",
            TEST_PASSWORD
        ))
        .send()
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .unwrap()
        .to_string();

    let dashboard = client
        .get(format!("http://{addr}/"))
        .header(header::COOKIE, cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(dashboard.text().await.unwrap().contains("<iframe"));
}
