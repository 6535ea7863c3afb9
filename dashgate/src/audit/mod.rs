//! ログイン成功の監査ログ
//!
//! 公開ディレクトリの外に置いたテキストファイルへ1行ずつ追記する。
//! このシステムは監査ログを読み返さない。

/// 排他ロック付きファイル追記
pub mod writer;

use chrono::{Local, NaiveDateTime};
use std::net::IpAddr;

/// タイムスタンプ書式（`YYYY-MM-DD HH:MM:SS`、サーバーのローカル時刻）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// IPアドレスが取得できない場合の表記
pub const UNKNOWN_IP: &str = "N/A";

/// 監査ログの1エントリ（ログイン成功）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    /// 記録時刻（ローカル時刻）
    pub timestamp: NaiveDateTime,
    /// 認証されたメールアドレス
    pub email: String,
    /// クライアントIP
    pub client_ip: Option<IpAddr>,
}

impl AuditLogEntry {
    /// 現在時刻でログイン成功エントリを作成
    pub fn success(email: impl Into<String>, client_ip: Option<IpAddr>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            email: email.into(),
            client_ip,
        }
    }

    /// 改行込みのログ行に整形
    ///
    /// `2024-05-01 09:30:00 | SUCCESS | USER: a@b.c | IP: 192.0.2.1`
    pub fn to_line(&self) -> String {
        let ip = self
            .client_ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| UNKNOWN_IP.to_string());
        // 1エントリ1行を保つ
        let email: String = self.email.chars().filter(|c| !c.is_control()).collect();
        format!(
            "{} | SUCCESS | USER: {} | IP: {}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            email,
            ip
        )
    }
}
