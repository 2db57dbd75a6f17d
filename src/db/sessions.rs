//! # 방문자 세션 데이터베이스 쿼리 모듈
//!
//! ## 세션 라이프사이클
//! ```text
//! [생성] insert_session() → 유효(expires_at > now) → 만료 → (선택) delete_expired_sessions()
//! ```
//!
//! 세션 행은 한 번 쓰이면 변경되지 않습니다. 만료된 행은 그대로 두어도 무해하며,
//! 정리 작업이 주기적으로 삭제할 수 있습니다. 조회 기록(`page_views`)은 건드리지 않습니다.

use crate::error::AppError;
use crate::models::Session;
use sqlx::SqliteExecutor;

/// 새 세션 행을 저장합니다.
///
/// 시각 인자는 `TIMESTAMP_FORMAT` 형식의 문자열입니다.
pub async fn insert_session(
    executor: impl SqliteExecutor<'_>,
    id: &str,
    created_at: &str,
    expires_at: &str,
) -> Result<Session, AppError> {
    sqlx::query(
        r#"
        INSERT INTO sessions (id, created_at, expires_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(created_at)
    .bind(expires_at)
    .execute(executor)
    .await?;

    Ok(Session {
        id: id.to_string(),
        created_at: created_at.to_string(),
        expires_at: expires_at.to_string(),
    })
}

/// ID로 세션 하나를 조회합니다. 만료 여부는 판단하지 않습니다.
///
/// 이 모듈의 함수들은 `&SqlitePool`과 트랜잭션 연결(`&mut *tx`)을 모두 받습니다.
pub async fn find_session(
    executor: impl SqliteExecutor<'_>,
    id: &str,
) -> Result<Option<Session>, AppError> {
    let session = sqlx::query_as::<_, Session>(
        r#"
        SELECT id, created_at, expires_at
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(session)
}

/// `expires_at <= now`인 세션을 삭제하고 삭제된 행 수를 반환합니다.
///
/// 같은 형식의 고정 자릿수 UTC 문자열끼리는 사전순 비교가 시간순 비교와 같습니다.
pub async fn delete_expired_sessions(
    executor: impl SqliteExecutor<'_>,
    now: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
