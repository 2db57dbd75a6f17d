//! # 조회 원장(View Ledger)과 집계(Aggregation) 서비스
//!
//! - 쓰기: `record_view()` — 세션당 URL당 한 번만 기록 (멱등)
//! - 읽기: `count_unique_views()`, `list_all_view_counts()`, `get_view_details()`
//!
//! 읽기 함수들은 세션을 다루지 않습니다. 조회 기록이 없는 URL은 에러가 아니라
//! 0과 빈 목록으로 표현됩니다.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::{Acquire, Sqlite, SqliteExecutor};

use crate::{
    db,
    error::AppError,
    models::{
        format_timestamp, RecentView, RecordOutcome, UrlViewCount, ViewDetails, MAX_URL_LEN,
        RECENT_VIEWS_LIMIT,
    },
};

/// 쿼리 파라미터로 받은 URL을 정리합니다.
///
/// - 앞뒤 공백 제거
/// - 빈 문자열은 "지정 안 함"(`None`)으로 취급
/// - `MAX_URL_LEN`을 넘으면 400 에러
pub fn normalize_url(raw: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(url) = raw.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if url.chars().count() > MAX_URL_LEN {
        return Err(AppError::BadRequest(format!(
            "url must be at most {} characters",
            MAX_URL_LEN
        )));
    }
    Ok(Some(url.to_string()))
}

/// `(session_id, url)` 조회를 기록합니다.
///
/// 같은 쌍으로 몇 번을 호출하든 저장 상태는 한 번 호출한 것과 같습니다.
/// 이미 기록된 쌍은 재방문자의 정상적인 경우이므로 에러도, 실패 로그도 남기지 않습니다.
pub async fn record_view(
    executor: impl SqliteExecutor<'_>,
    session_id: &str,
    url: &str,
    now: DateTime<Utc>,
) -> Result<RecordOutcome, AppError> {
    let recorded = db::insert_view(executor, url, session_id, &format_timestamp(now)).await?;

    if recorded {
        tracing::debug!(url, "Recorded first view for session");
    } else {
        tracing::trace!(url, "Repeat view ignored");
    }

    Ok(RecordOutcome { recorded })
}

/// URL을 본 서로 다른 세션의 수
pub async fn count_unique_views(
    executor: impl SqliteExecutor<'_>,
    url: &str,
) -> Result<i64, AppError> {
    db::count_views_for_url(executor, url).await
}

/// 한 번이라도 조회된 모든 URL과 고유 조회수 (내림차순, 동률이면 URL 오름차순)
pub async fn list_all_view_counts(
    executor: impl SqliteExecutor<'_>,
) -> Result<Vec<UrlViewCount>, AppError> {
    db::list_view_counts(executor).await
}

/// URL 하나의 고유 조회수와 최근 조회 10건 (세션 ID는 가려서 반환)
///
/// 두 쿼리를 같은 연결에서 실행하므로 트랜잭션 안에서는 같은 스냅샷을 봅니다.
pub fn get_view_details<'a, 'u, A>(
    conn: A,
    url: &'u str,
) -> impl Future<Output = Result<ViewDetails, AppError>> + Send + use<'a, 'u, A>
where
    A: Acquire<'a, Database = Sqlite> + Send + 'a,
{
    async move {
        let mut conn = conn.acquire().await?;
        let unique_views = count_unique_views(&mut *conn, url).await?;
        let recent_views = db::list_recent_views(&mut *conn, url, RECENT_VIEWS_LIMIT)
            .await?
            .into_iter()
            .map(RecentView::from)
            .collect();

        Ok(ViewDetails {
            url: url.to_string(),
            unique_views,
            recent_views,
        })
    }
}
