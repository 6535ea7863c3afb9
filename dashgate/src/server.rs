//! axumサーバー起動・シャットダウンハンドリング

use crate::session::SessionStore;
use crate::shutdown::ShutdownController;
use crate::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// 期限切れセッションを掃除する間隔
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// axumサーバーを起動し、シャットダウンシグナルを待機する
pub async fn run(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("dashgate listening on {}", bind_addr);

    let shutdown = ShutdownController::default();
    let sweeper = spawn_session_sweeper(
        state.gate.sessions().clone(),
        SESSION_SWEEP_INTERVAL,
        shutdown.clone(),
    );

    let app = crate::api::create_app(state);

    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
    .await;

    // サーバーエラーで抜けた場合もスイーパーは止める
    shutdown.request_shutdown();
    if let Err(e) = sweeper.await {
        warn!("Session sweeper task failed: {}", e);
    }
    result?;

    info!("Server shutdown complete");
    Ok(())
}

/// 期限切れセッションを定期的に削除するタスクを起動する
///
/// `shutdown` が要求されると終了する。
pub fn spawn_session_sweeper(
    sessions: Arc<dyn SessionStore>,
    interval: Duration,
    shutdown: ShutdownController,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // 初回tickは即時に完了するので読み捨てる
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    debug!("Session sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match sessions.purge_expired().await {
                        Ok(0) => {}
                        Ok(purged) => debug!(purged, "Purged expired sessions"),
                        Err(e) => warn!("Failed to purge expired sessions: {}", e),
                    }
                }
            }
        }
    })
}

/// シャットダウンシグナルを待機
async fn shutdown_signal(shutdown: ShutdownController) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
        _ = shutdown.wait() => {
            info!("Shutdown requested, shutting down...");
        }
    }
    shutdown.request_shutdown();
}
