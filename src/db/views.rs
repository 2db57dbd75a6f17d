//! # 조회 기록(View Ledger) 데이터베이스 쿼리 모듈
//!
//! `page_views`는 append-only 로그입니다. 행은 `(url, session_id)` 쌍마다 최대 한 번 삽입되고,
//! 이후 수정/삭제되지 않습니다.
//!
//! ## 중복 제거 방식
//! "존재 확인 후 삽입"은 동시 요청 사이에 경쟁 조건이 생기므로 쓰지 않습니다.
//! 대신 한 번의 제약조건 삽입으로 처리합니다:
//! ```sql
//! INSERT ... ON CONFLICT(url, session_id) DO NOTHING
//! ```
//! 충돌 대상을 `(url, session_id)`로 지정했기 때문에, 이 유일성 충돌만 흡수되고
//! 다른 제약 위반이나 연결 오류는 그대로 에러로 전파됩니다.

use crate::error::AppError;
use crate::models::{RecentViewRow, UrlViewCount};
use sqlx::SqliteExecutor;

/// 조회 기록 삽입을 시도합니다.
///
/// ## 반환값
/// - `Ok(true)`: 처음 보는 `(url, session_id)` — 새 행이 추가됨
/// - `Ok(false)`: 이미 기록된 쌍 — 아무 것도 바뀌지 않음 (정상 흐름)
/// - `Err(_)`: 그 밖의 저장소 오류
pub async fn insert_view(
    executor: impl SqliteExecutor<'_>,
    url: &str,
    session_id: &str,
    viewed_at: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO page_views (url, session_id, viewed_at)
        VALUES (?, ?, ?)
        ON CONFLICT(url, session_id) DO NOTHING
        "#,
    )
    .bind(url)
    .bind(session_id)
    .bind(viewed_at)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// URL 하나의 조회 기록 수 (= 그 URL을 본 서로 다른 세션 수)
pub async fn count_views_for_url(
    executor: impl SqliteExecutor<'_>,
    url: &str,
) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM page_views WHERE url = ?")
        .bind(url)
        .fetch_one(executor)
        .await?;

    Ok(count)
}

/// 모든 URL의 조회수를 내림차순으로 조회합니다.
///
/// 조회수가 같으면 URL 오름차순으로 정렬하여 같은 데이터에서는 항상 같은 순서를 보장합니다.
/// 조회 기록이 없는 URL은 결과에 나타나지 않습니다.
pub async fn list_view_counts(
    executor: impl SqliteExecutor<'_>,
) -> Result<Vec<UrlViewCount>, AppError> {
    let counts = sqlx::query_as::<_, UrlViewCount>(
        r#"
        SELECT url, COUNT(*) AS unique_views
        FROM page_views
        GROUP BY url
        ORDER BY unique_views DESC, url ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(counts)
}

/// URL의 최근 조회 기록을 최신순으로 최대 `limit`건 조회합니다.
///
/// `viewed_at`이 같으면 나중에 삽입된 행(id가 큰 행)이 먼저 옵니다.
pub async fn list_recent_views(
    executor: impl SqliteExecutor<'_>,
    url: &str,
    limit: i64,
) -> Result<Vec<RecentViewRow>, AppError> {
    let records = sqlx::query_as::<_, RecentViewRow>(
        r#"
        SELECT session_id, viewed_at
        FROM page_views
        WHERE url = ?
        ORDER BY viewed_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(url)
    .bind(limit)
    .fetch_all(executor)
    .await?;

    Ok(records)
}
