//! 監査ログライター
//!
//! 1エントリごとにファイルを追記モードで開き、fs2の排他ロックを
//! 書き込みの間だけ保持する。複数リクエストが同時にログインしても
//! 行が混ざらない。

use super::AuditLogEntry;
use crate::common::error::{GateError, GateResult};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// 監査ログの追記ライター
///
/// Clone可能（パスの共有のみ）。
#[derive(Debug, Clone)]
pub struct AuditLogWriter {
    path: Arc<PathBuf>,
}

impl AuditLogWriter {
    /// 新しいライターを作成（ファイルは最初の書き込み時に作成）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// 監査ログのパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// エントリを1行追記する
    ///
    /// ブロッキングI/Oは `spawn_blocking` 上で行う。
    pub async fn append(&self, entry: &AuditLogEntry) -> GateResult<()> {
        let path = Arc::clone(&self.path);
        let line = entry.to_line();

        tokio::task::spawn_blocking(move || append_line(&path, &line))
            .await
            .map_err(|e| GateError::Internal(format!("audit log task failed: {e}")))??;

        debug!(path = %self.path.display(), "audit log entry appended");
        Ok(())
    }
}

/// 排他ロックを取得して1行追記する
pub fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let written = file
        .write_all(line.as_bytes())
        .and_then(|_| file.flush());
    // 書き込み結果にかかわらずロックは解放する
    let released = FileExt::unlock(&file);

    written?;
    released
}
