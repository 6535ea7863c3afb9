//! 統合テスト共通ヘルパー
//!
//! テストバイナリごとに使う関数が異なるため、未使用警告は抑止する。
#![allow(dead_code)]

pub mod gate;
pub mod http;
