//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok", "timestamp": "2026-02-16T12:00:00.000Z" }`
//!
//! 세션을 확인하지도, 조회를 기록하지도 않습니다.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// `GET /api/health` — 서버 상태와 현재 UTC 시각(ISO 8601)을 반환합니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }))
}
