//! セッション管理
//!
//! ブラウザのCookieで運ばれるセッションIDをキーに、サーバー側で
//! 認証フラグを保持する。ストアは `SessionStore` trait として
//! ハンドラーへ明示的に渡す。

/// セッションCookieの生成・解析
pub mod cookie;

/// インメモリセッションストア
pub mod memory;

pub use memory::MemorySessionStore;

use crate::common::error::GateResult;
use async_trait::async_trait;
use rand::RngExt;
use std::fmt;

/// セッションIDの長さ（英数字）
pub const SESSION_ID_LEN: usize = 48;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// セッションID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// 新しいランダムなセッションIDを生成
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id: String = (0..SESSION_ID_LEN)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect();
        Self(id)
    }

    /// Cookie値からセッションIDを復元する
    ///
    /// 生成形式（英数字・固定長）に合わない値は `None`。
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() == SESSION_ID_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(value.to_string()))
        } else {
            None
        }
    }

    /// 文字列として参照
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// セッションに保存される属性
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionData {
    /// ログイン済みかどうか
    pub authenticated: bool,
}

/// セッションストアのcapability
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// セッションを取得（存在しない・期限切れなら `None`）
    async fn get(&self, id: &SessionId) -> GateResult<Option<SessionData>>;
    /// セッションを保存（有効期限を延長）
    async fn put(&self, id: &SessionId, data: SessionData) -> GateResult<()>;
    /// セッションを破棄
    async fn destroy(&self, id: &SessionId) -> GateResult<()>;
    /// 期限切れセッションを削除し、削除件数を返す
    ///
    /// 有効期限を外部で管理するストアは何もしなくてよい。
    async fn purge_expired(&self) -> GateResult<usize> {
        Ok(0)
    }
}
