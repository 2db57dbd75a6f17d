//! # 조회 수집 파사드(Ingestion Façade)
//!
//! 세션 확인과 조회 기록을 한 트랜잭션으로 묶는 유일한 지점입니다.
//! HTTP 핸들러는 이 모듈만 호출하고, 세션/원장/집계를 직접 엮지 않습니다.
//!
//! ```text
//! 쿠키 토큰 ─→ resolve_session ─→ record_view(target_url) ─→ 보고서 생성
//!                  │                                            ├ detail_url 있음 → get_view_details
//!                  └ 새 세션이면 쿠키 설정 지시                    └ 없음         → 전체 목록 + URL 수
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{ViewReport, ViewSummary},
    services::{sessions, views, ResolvedSession},
};

/// 파사드 호출 결과
#[derive(Debug, Clone)]
pub struct TrackedReport {
    /// 이번 요청의 세션. `is_new`이면 호출자가 쿠키를 내려보내야 합니다.
    pub session: ResolvedSession,
    pub report: ViewReport,
}

/// 세션을 확인하고 `target_url` 조회를 기록한 뒤 보고서를 만듭니다.
///
/// 조회 기록의 결과(새 행인지 중복인지)는 보고서 내용에 영향을 주지 않습니다.
///
/// ## 트랜잭션
/// 세션 발급, 조회 기록, 보고서 조회를 하나의 트랜잭션으로 묶고 보고서가 만들어진 뒤에만
/// 커밋합니다. 중간 단계가 실패하면 `tx`가 커밋 없이 drop되어 롤백되므로,
/// 실패한 요청이 세션 행이나 조회 행을 남기지 않습니다.
pub async fn track_and_report(
    pool: &SqlitePool,
    presented_token: Option<&str>,
    target_url: &str,
    detail_url: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TrackedReport, AppError> {
    let mut tx = pool.begin().await?;

    let session = sessions::resolve_session(&mut *tx, presented_token, now).await?;

    views::record_view(&mut *tx, &session.id, target_url, now).await?;

    let report = match detail_url {
        Some(url) => ViewReport::Details(views::get_view_details(&mut *tx, url).await?),
        None => ViewReport::Summary(ViewSummary::new(
            views::list_all_view_counts(&mut *tx).await?,
        )),
    };

    tx.commit().await?;

    Ok(TrackedReport { session, report })
}
