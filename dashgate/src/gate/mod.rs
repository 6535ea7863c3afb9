//! アクセスゲート
//!
//! 1リクエスト分の処理：セッションの読み込み、状態遷移、監査ログ追記。
//! 結果はリダイレクトか表示する `View` で、HTML化は呼び出し側が行う。

/// 状態遷移（純粋関数）
pub mod state;

pub use state::{AccessState, Intent, LoginForm};

use crate::audit::writer::AuditLogWriter;
use crate::audit::AuditLogEntry;
use crate::auth::CredentialVerifier;
use crate::common::error::{GateError, GateResult};
use crate::session::{SessionData, SessionId, SessionStore};
use crate::view::View;
use axum::http::Method;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// 認証失敗時にフォームへ表示するメッセージ
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Invalid email or password. Please check your credentials.";

/// ゲートへの入力
#[derive(Debug, Clone)]
pub struct GateRequest {
    /// HTTPメソッド
    pub method: Method,
    /// フォームフィールド（GETでは空）
    pub form: LoginForm,
    /// Cookieで送られてきたセッションID
    pub session_id: Option<SessionId>,
    /// クライアントIP（取得できない場合は `None`）
    pub client_ip: Option<IpAddr>,
}

/// 応答の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// ゲート自身へのリダイレクト（本文なし）
    Redirect,
    /// 画面を表示
    Render(View),
}

/// セッションCookieに対する操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCookie {
    /// 何もしない
    Unchanged,
    /// 新しいセッションIDを発行
    Issue(SessionId),
    /// Cookieを削除
    Clear,
}

/// ゲートの出力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResponse {
    /// 応答の種類
    pub outcome: GateOutcome,
    /// Cookie操作
    pub cookie: SessionCookie,
}

/// アクセスゲート本体
pub struct AccessGate {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: Arc<dyn SessionStore>,
    audit_log: AuditLogWriter,
}

impl AccessGate {
    /// 新しいゲートを作成
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        sessions: Arc<dyn SessionStore>,
        audit_log: AuditLogWriter,
    ) -> Self {
        Self {
            verifier,
            sessions,
            audit_log,
        }
    }

    /// セッションストア
    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// 監査ログライター
    pub fn audit_log(&self) -> &AuditLogWriter {
        &self.audit_log
    }

    /// 1リクエストを処理する
    ///
    /// ログイン成功時はセッションIDを振り直し、監査ログの追記を待ってから
    /// リダイレクトを返す。
    /// 追記の失敗は警告ログに残すだけで、ログイン自体は成功させる。
    pub async fn handle_request(&self, request: GateRequest) -> GateResult<GateResponse> {
        let (session_id, data, is_new) = self.load_session(request.session_id.as_ref()).await?;
        let state = AccessState::from(data);
        let issued = if is_new {
            SessionCookie::Issue(session_id.clone())
        } else {
            SessionCookie::Unchanged
        };

        match state::classify(state, &request.method, &request.form) {
            Intent::Logout => {
                self.sessions.destroy(&session_id).await?;
                info!("Session logged out");
                Ok(GateResponse {
                    outcome: GateOutcome::Redirect,
                    cookie: SessionCookie::Clear,
                })
            }
            Intent::Login { email, password } => {
                match self.verifier.verify(email, password).await {
                    Ok(()) => {}
                    Err(GateError::InvalidCredentials) => {
                        info!(email = %email, "Login rejected");
                        return Ok(GateResponse {
                            outcome: GateOutcome::Render(View::Login {
                                error_message: Some(INVALID_CREDENTIALS_MESSAGE.to_string()),
                                email: email.to_string(),
                            }),
                            cookie: issued,
                        });
                    }
                    Err(e) => return Err(e),
                }

                // ログイン前のIDは引き継がない（セッション固定化対策）
                self.sessions.destroy(&session_id).await?;
                let authenticated_id = SessionId::generate();
                self.sessions
                    .put(&authenticated_id, SessionData { authenticated: true })
                    .await?;

                let entry = AuditLogEntry::success(email, request.client_ip);
                if let Err(e) = self.audit_log.append(&entry).await {
                    warn!(
                        path = %self.audit_log.path().display(),
                        "Failed to write audit log entry: {}",
                        e
                    );
                }

                info!(email = %email, "Login succeeded");
                Ok(GateResponse {
                    outcome: GateOutcome::Redirect,
                    cookie: SessionCookie::Issue(authenticated_id),
                })
            }
            Intent::Show => Ok(GateResponse {
                outcome: GateOutcome::Render(state::view_for(state)),
                cookie: issued,
            }),
        }
    }

    /// 既存セッションを読み込む。なければ新規作成する
    ///
    /// ストアに存在しないIDはクライアントが指定しても採用しない。
    async fn load_session(
        &self,
        requested: Option<&SessionId>,
    ) -> GateResult<(SessionId, SessionData, bool)> {
        if let Some(id) = requested {
            if let Some(data) = self.sessions.get(id).await? {
                return Ok((id.clone(), data, false));
            }
        }

        let id = SessionId::generate();
        let data = SessionData::default();
        self.sessions.put(&id, data).await?;
        Ok((id, data, true))
    }
}
