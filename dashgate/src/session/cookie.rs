//! セッションCookie
//!
//! Set-Cookieヘッダーの生成と、リクエストCookieからのセッションID抽出

use super::SessionId;
use axum::http::{header, HeaderMap};

/// セッションCookie名
pub const SESSION_COOKIE: &str = "dashgate_session";

/// セッションCookieヘッダーを生成
///
/// ブラウザ終了で消えるセッションCookie。失効はサーバー側のTTLで管理する。
pub fn build_session_cookie(id: &SessionId, path: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id, path
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// セッションCookieを削除するためのヘッダーを生成
pub fn clear_session_cookie(path: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path={}; HttpOnly; SameSite=Lax; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        SESSION_COOKIE, path
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// CookieヘッダーからセッションIDを取り出す
///
/// 形式が不正な値は無視し、新規セッション扱いにする。
pub fn extract_session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|part| part.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .find_map(SessionId::parse)
}

/// リクエストがHTTPS経由か（リバースプロキシのヘッダーで判定）
pub fn is_request_secure(headers: &HeaderMap) -> bool {
    if let Some(proto) = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
    {
        if proto.eq_ignore_ascii_case("https") {
            return true;
        }
    }
    if let Some(forwarded) = headers
        .get("forwarded")
        .and_then(|value| value.to_str().ok())
    {
        let lowered = forwarded.to_ascii_lowercase();
        if lowered.contains("proto=https") {
            return true;
        }
    }
    false
}
