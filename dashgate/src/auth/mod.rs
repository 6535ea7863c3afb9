// 認証モジュール

use crate::common::error::{GateError, GateResult};
use async_trait::async_trait;

/// 認証情報の検証インターフェース
///
/// リクエスト処理フローはこのtraitにのみ依存するため、
/// ハッシュ化パスワードや複数ユーザーのストアに差し替えられる。
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// メールアドレスとパスワードの組を検証する
    ///
    /// 不一致は `GateError::InvalidCredentials`。それ以外のエラーは
    /// 検証自体ができなかったことを表す。
    async fn verify(&self, email: &str, password: &str) -> GateResult<()>;
}

/// 設定値の1組だけを受け付けるシングルテナント検証器
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    email: String,
    password: String,
}

impl StaticCredentialVerifier {
    /// 新しい検証器を作成
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> GateResult<()> {
        // 文字列の完全一致（大文字小文字も区別）
        if email == self.email && password == self.password {
            Ok(())
        } else {
            Err(GateError::InvalidCredentials)
        }
    }
}
