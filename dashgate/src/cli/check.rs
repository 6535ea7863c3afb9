//! check サブコマンド
//!
//! 環境変数から設定を読み込み、有効な値を表示します（パスワードは伏せる）。

use crate::config::GateConfig;
use clap::Args;

/// check サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {}

/// Execute the check command
pub fn execute(_args: &CheckArgs) -> Result<(), anyhow::Error> {
    let config = GateConfig::from_env()?;
    println!("{}", describe(&config));
    Ok(())
}

/// 設定内容を人が読める形にする
pub fn describe(config: &GateConfig) -> String {
    format!(
        "email:         {}\npassword:      {}\ndashboard_url: {}\naudit_log:     {}\nbase_path:     {}\npage_title:    {}\nsession_ttl:   {}s\ntrust_proxy:   {}",
        config.email,
        "*".repeat(config.password.chars().count().min(8)),
        config.dashboard_url,
        config.audit_log_path.display(),
        config.base_path,
        config.page_title,
        config.session_ttl.as_secs(),
        config.trust_proxy,
    )
}
