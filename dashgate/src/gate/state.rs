//! セッション単位の状態遷移
//!
//! `Unauthenticated` → `Authenticated`（正しい認証情報の送信）→
//! `Unauthenticated`（ログアウト）の2状態のみ。
//! ここはレンダリングにもストアにも依存しない。

use crate::session::SessionData;
use crate::view::View;
use axum::http::Method;
use serde::Deserialize;

/// ログアウトを表す `action` フィールドの値
pub const LOGOUT_ACTION: &str = "logout";

/// セッションの認証状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessState {
    /// 未ログイン（初期状態）
    #[default]
    Unauthenticated,
    /// ログイン済み
    Authenticated,
}

impl From<SessionData> for AccessState {
    fn from(data: SessionData) -> Self {
        if data.authenticated {
            AccessState::Authenticated
        } else {
            AccessState::Unauthenticated
        }
    }
}

/// 送信されたフォーム
///
/// 欠けているフィールドは空文字列として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    /// メールアドレス
    pub email: String,
    /// パスワード
    pub password: String,
    /// `logout` ならログアウト要求
    pub action: String,
}

impl LoginForm {
    /// urlencodedボディを解析する（解析できなければ空フォーム）
    pub fn from_urlencoded(body: &[u8]) -> Self {
        serde_urlencoded::from_bytes(body).unwrap_or_default()
    }

    /// ログアウト要求か
    pub fn is_logout(&self) -> bool {
        self.action == LOGOUT_ACTION
    }
}

/// リクエストが意図する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent<'a> {
    /// セッションを破棄してリダイレクト
    Logout,
    /// 認証情報の検証
    Login {
        /// 前後の空白を除いたメールアドレス
        email: &'a str,
        /// パスワード（そのまま）
        password: &'a str,
    },
    /// 現在の状態を表示
    Show,
}

/// 状態・メソッド・フォームから操作を決める
pub fn classify<'a>(state: AccessState, method: &Method, form: &'a LoginForm) -> Intent<'a> {
    if form.is_logout() {
        return Intent::Logout;
    }
    if state == AccessState::Unauthenticated && *method == Method::POST {
        return Intent::Login {
            email: form.email.trim(),
            password: &form.password,
        };
    }
    Intent::Show
}

/// 状態に対応する画面（エラーなし）
pub fn view_for(state: AccessState) -> View {
    match state {
        AccessState::Unauthenticated => View::login(),
        AccessState::Authenticated => View::Dashboard,
    }
}
