//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 중복 조회(이미 기록된 `(url, session_id)` 쌍)는 에러가 아닙니다.
//! 조회 원장(`db::views`)이 그 경우를 직접 처리하므로 여기에는 대응하는 variant가 없습니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 503 또는 500)
    /// #[from]: `?` 연산자로 sqlx::Error가 자동 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 저장소에 닿지 못한 일시적 장애인지 판별합니다.
    ///
    /// 연결 풀 타임아웃, 닫힌 풀, 입출력 오류가 여기에 해당하며
    /// 클라이언트에는 503으로 전달됩니다. 재시도하면 성공할 수 있는 종류입니다.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let transient = self.is_transient();
        let (status, code, message) = match self {
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) if transient => {
                tracing::error!("Storage unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "storage_unavailable",
                    "The storage backend is temporarily unavailable".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "bad_request", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
