//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! ゲートで発生し得るエラーはすべて回復可能。認証失敗はフォーム再表示、
//! 監査ログ書き込み失敗は警告ログのみで、ユーザーには見せない。

use axum::http::StatusCode;
use thiserror::Error;

/// access gate error type
#[derive(Debug, Error)]
pub enum GateError {
    /// Submitted email/password do not match the configured pair
    ///
    /// Returned by `CredentialVerifier`; the gate turns it into the login
    /// form with an error message instead of an error response.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Appending to the audit log failed
    #[error("Audit log write failed: {0}")]
    AuditLog(#[from] std::io::Error),

    /// Session store error
    #[error("Session store error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Returns a safe error message for external clients.
    ///
    /// Full details (`to_string()`) belong in server logs only.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid email or password",
            Self::AuditLog(_) => "Internal server error",
            Self::Session(_) => "Session unavailable",
            Self::Config(_) => "Server misconfigured",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AuditLog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Session(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// ゲート操作の結果型
pub type GateResult<T> = Result<T, GateError>;
