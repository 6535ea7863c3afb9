//! HTTPハンドラー
//!
//! ゲートは単一ルート（設定されたベースパス）のGET/POSTのみ

/// エラーレスポンス
pub mod error;

/// ゲート画面のGET/POST
pub mod gate;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// アプリケーションルーターを作成
pub fn create_app(state: AppState) -> Router {
    let base_path = state.config.base_path.clone();
    Router::new()
        .route(&base_path, get(gate::show_gate).post(gate::submit_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
