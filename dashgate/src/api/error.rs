//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::GateError;
use crate::view::escape_html;
use axum::{
    http::header,
    response::{Html, IntoResponse},
};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub GateError);

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 詳細はサーバーログのみに出し、クライアントには汎用メッセージを返す
        tracing::error!("Request failed: {}", self.0);

        let status = self.0.status_code();
        let message = escape_html(self.0.external_message());
        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>{status}</title></head>\n<body><p>{message}</p></body>\n</html>\n"
        );

        (status, [(header::CACHE_CONTROL, "no-store")], Html(body)).into_response()
    }
}
