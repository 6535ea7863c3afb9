//! 共通モジュール
//!
//! エラー型とクライアントIPの正規化

/// エラー型定義
pub mod error;

/// IPアドレス正規化ユーティリティ
pub mod ip;
