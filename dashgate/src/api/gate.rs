//! ゲート画面ハンドラー
//!
//! `GET <base>` で現在の状態を表示し、`POST <base>` でログイン・ログアウトを受け付ける。

use super::error::AppError;
use crate::common::error::GateError;
use crate::common::ip::resolve_client_ip;
use crate::gate::{GateOutcome, GateRequest, GateResponse, LoginForm, SessionCookie};
use crate::session::cookie::{
    build_session_cookie, clear_session_cookie, extract_session_id, is_request_secure,
};
use crate::view::{self, PageContext};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::net::SocketAddr;

/// GET <base> - 現在の状態を表示
///
/// # Returns
/// * `200 OK` - ログインフォームまたはダッシュボード
pub async fn show_gate(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    handle(state, Method::GET, connect_info, headers, LoginForm::default()).await
}

/// POST <base> - ログイン試行またはログアウト
///
/// ボディは `application/x-www-form-urlencoded`。解析できないボディは空フォーム扱い。
///
/// # Returns
/// * `302 Found` - ログイン成功・ログアウト（`Location` はゲート自身）
/// * `200 OK` - 認証失敗時のログインフォーム、またはログイン済みの再表示
pub async fn submit_gate(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let form = LoginForm::from_urlencoded(&body);
    handle(state, Method::POST, connect_info, headers, form).await
}

async fn handle(
    state: AppState,
    method: Method,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    form: LoginForm,
) -> Result<Response, AppError> {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let request = GateRequest {
        method,
        form,
        session_id: extract_session_id(&headers),
        client_ip: resolve_client_ip(peer.as_ref(), &headers, state.config.trust_proxy),
    };

    let response = state.gate.handle_request(request).await?;
    into_http_response(&state, &headers, response)
}

fn into_http_response(
    state: &AppState,
    request_headers: &HeaderMap,
    response: GateResponse,
) -> Result<Response, AppError> {
    let config = &state.config;
    let secure = is_request_secure(request_headers);

    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    let cookie = match &response.cookie {
        SessionCookie::Issue(id) => Some(build_session_cookie(id, &config.base_path, secure)),
        SessionCookie::Clear => Some(clear_session_cookie(&config.base_path, secure)),
        SessionCookie::Unchanged => None,
    };
    if let Some(cookie) = cookie {
        headers.append(header::SET_COOKIE, header_value(&cookie)?);
    }

    match response.outcome {
        GateOutcome::Redirect => {
            headers.insert(header::LOCATION, header_value(&config.base_path)?);
            Ok((StatusCode::FOUND, headers).into_response())
        }
        GateOutcome::Render(page) => {
            let html = view::render(
                &page,
                &PageContext {
                    title: &config.page_title,
                    action: &config.base_path,
                    dashboard_url: &config.dashboard_url,
                },
            );
            Ok((StatusCode::OK, headers, Html(html)).into_response())
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError(GateError::Internal(format!("invalid header value: {e}"))))
}
