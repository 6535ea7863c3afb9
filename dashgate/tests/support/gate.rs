use std::path::PathBuf;

use axum::Router;
use dashgate::config::GateConfig;
use dashgate::{api, AppState};
use tempfile::TempDir;

pub const TEST_EMAIL: &str = "ygemii@gmail.com";
pub const TEST_PASSWORD: &str = "Test123456";
pub const TEST_DASHBOARD_URL: &str =
    "https://app.powerbi.com/view?r=eyJrIjoiNDM&pageName=ReportSection";

/// テスト用ゲート（監査ログは一時ディレクトリに書く）
pub struct TestGate {
    pub app: Router,
    pub state: AppState,
    pub log_path: PathBuf,
    _dir: TempDir,
}

impl TestGate {
    /// 監査ログの内容（未作成なら空文字列）
    pub fn audit_log(&self) -> String {
        std::fs::read_to_string(&self.log_path).unwrap_or_default()
    }

    /// 監査ログの行
    pub fn audit_lines(&self) -> Vec<String> {
        self.audit_log().lines().map(str::to_string).collect()
    }
}

/// デフォルト設定のゲートを作成する
pub fn create_test_gate() -> TestGate {
    create_test_gate_with(|config| config)
}

/// 設定を差し替えてゲートを作成する
pub fn create_test_gate_with(configure: impl FnOnce(GateConfig) -> GateConfig) -> TestGate {
    let dir = tempfile::tempdir().expect("create temp dir");
    let log_path = dir.path().join("logs").join("access_log.txt");
    let config = configure(
        GateConfig::new(TEST_EMAIL, TEST_PASSWORD, TEST_DASHBOARD_URL)
            .with_audit_log_path(&log_path),
    );
    let log_path = config.audit_log_path.clone();
    let state = AppState::from_config(config);
    let app = api::create_app(state.clone());
    TestGate {
        app,
        state,
        log_path,
        _dir: dir,
    }
}
