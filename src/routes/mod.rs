//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `views`: 조회수 JSON API와 HTML 페이지

pub mod health;
pub mod views;

pub use health::*;
pub use views::*;

use axum::{routing::get, Router};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 요청 간에 공유하는 가변 상태는 없고, 연결 풀만 들고 있습니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (내부적으로 Arc로 공유)
    pub pool: SqlitePool,
}

/// API 라우터를 만듭니다. 정적 파일, CORS, 로깅 레이어는 main.rs에서 덧붙입니다.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/views", get(views_json))
        .route("/views", get(views_html))
        .route("/api/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use axum::{
        body::{to_bytes, Body},
        http::{header::SET_COOKIE, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app() -> Router {
        router(AppState { pool: test_pool().await })
    }

    #[tokio::test]
    async fn health_reports_ok_with_timestamp() {
        let response = app()
            .await
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(SET_COOKIE).is_none());

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
