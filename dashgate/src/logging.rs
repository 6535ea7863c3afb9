//! ロギング初期化
//!
//! 標準出力に加え、`DASHGATE_LOG_DIR` が設定されていれば日次ローテーションの
//! ファイルにも出力する。監査ログ（ログイン成功記録）とは別物。

use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログファイル名のプレフィックス（`dashgate.log.YYYY-MM-DD`）
pub const LOG_FILE_PREFIX: &str = "dashgate.log";

const DEFAULT_LOG_LEVEL: &str = "info";

// non_blockingライターのフラッシュスレッドをプロセス終了まで保持する
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// ログレベルのフィルタを構築する
///
/// `DASHGATE_LOG_LEVEL` → `RUST_LOG` → `info` の順に参照する。
/// 解釈できない指定は `info` にフォールバック。
pub fn env_filter() -> EnvFilter {
    let directive = std::env::var("DASHGATE_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// ログファイルの出力先ディレクトリ（未設定ならファイル出力なし）
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("DASHGATE_LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
}

/// グローバルsubscriberを初期化する
pub fn init() -> anyhow::Result<()> {
    let file_layer = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(())
}
