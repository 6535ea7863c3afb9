//! インメモリセッションストア
//!
//! 最終アクセスからの経過時間（アイドルTTL）で失効する。

use super::{SessionData, SessionId, SessionStore};
use crate::common::error::GateResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: Instant,
}

/// プロセス内で完結するセッションストア
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// 新しいストアを作成
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// 保持しているセッション数（期限切れ未削除分を含む）
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// セッションが1件もないか
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.last_seen) >= self.ttl
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &SessionId) -> GateResult<Option<SessionData>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(id) {
            Some(entry) => {
                if !self.is_expired(entry, now) {
                    entry.last_seen = now;
                    return Ok(Some(entry.data));
                }
            }
            None => return Ok(None),
        }
        sessions.remove(id);
        Ok(None)
    }

    async fn put(&self, id: &SessionId, data: SessionData) -> GateResult<()> {
        self.sessions.write().await.insert(
            id.clone(),
            Entry {
                data,
                last_seen: Instant::now(),
            },
        );
        Ok(())
    }

    async fn destroy(&self, id: &SessionId) -> GateResult<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> GateResult<usize> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        Ok(before - sessions.len())
    }
}
