//! dashgate: Dashboard Access Gate
//!
//! 固定認証情報でログインを検証し、埋め込みダッシュボードを表示する単一ページゲート

#![warn(missing_docs)]

/// 共通型定義（エラー、IPユーティリティ）
pub mod common;

/// HTTPハンドラー
pub mod api;

/// 認証情報の検証
pub mod auth;

/// ログイン成功の監査ログ（追記専用テキストファイル）
pub mod audit;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// アクセスゲートの状態遷移
pub mod gate;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動・シャットダウン
pub mod server;

/// Cookieベースのセッション管理
pub mod session;

/// 協調的シャットダウン
pub mod shutdown;

/// HTMLレンダリング
pub mod view;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// アクセスゲート本体
    pub gate: Arc<gate::AccessGate>,
    /// ゲート設定
    pub config: Arc<config::GateConfig>,
}

impl AppState {
    /// 設定からインメモリセッションストアと監査ログライターを組み立てる
    pub fn from_config(config: config::GateConfig) -> Self {
        let sessions: Arc<dyn session::SessionStore> =
            Arc::new(session::MemorySessionStore::new(config.session_ttl));
        Self::with_session_store(config, sessions)
    }

    /// 任意のセッションストアで組み立てる（外部ストアやテスト用）
    pub fn with_session_store(
        config: config::GateConfig,
        sessions: Arc<dyn session::SessionStore>,
    ) -> Self {
        let verifier = Arc::new(auth::StaticCredentialVerifier::new(
            config.email.clone(),
            config.password.clone(),
        ));
        let audit_log = audit::writer::AuditLogWriter::new(config.audit_log_path.clone());
        let gate = gate::AccessGate::new(verifier, sessions, audit_log);

        Self {
            gate: Arc::new(gate),
            config: Arc::new(config),
        }
    }
}
