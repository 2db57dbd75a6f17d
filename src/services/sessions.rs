//! # 세션 저장소(Session Store) 서비스
//!
//! 요청이 내민 세션 토큰을 확인하고, 없거나 무효하면 새 세션을 발급합니다.
//!
//! ## 흐름
//! ```text
//! 토큰 없음 / DB에 없음 / 만료됨 → 새 ID 발급 → DB 저장 → is_new = true (쿠키 설정 필요)
//! 유효한 토큰                     → 그대로 반환 → is_new = false (쓰기 없음)
//! ```
//!
//! 토큰 없이 거의 동시에 들어온 두 요청은 서로 다른 세션 두 개를 만들 수 있습니다.
//! 세션은 익명 방문자의 근사치일 뿐이므로 이 경우는 허용합니다.

use std::future::Future;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};
use sqlx::{Acquire, Sqlite, SqliteExecutor, SqlitePool};
use tokio::task::JoinHandle;

use crate::{
    db,
    error::AppError,
    models::{format_timestamp, session_ttl},
};

/// 세션 ID 생성에 쓰는 난수 바이트 수 (256비트)
const SESSION_ID_BYTES: usize = 32;

/// 이보다 긴 토큰은 DB를 조회하지 않고 무효로 봅니다.
const MAX_TOKEN_LEN: usize = 128;

/// 세션 확인 결과
///
/// 요청 처리 중에 명시적으로 전달되는 컨텍스트입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    /// 이번 요청에 사용할 세션 ID
    pub id: String,
    /// 이번 요청에서 새로 발급되었는지 — true이면 호출자가 세션 쿠키를 설정해야 합니다.
    pub is_new: bool,
}

/// 암호학적으로 안전한 난수로 새 세션 ID를 만듭니다. (64자 16진수 문자열)
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// DB 조회 전에 걸러낼 수 있는 명백히 잘못된 토큰인지 확인합니다.
fn is_plausible_token(token: &str) -> bool {
    !token.is_empty() && token.len() <= MAX_TOKEN_LEN && token.chars().all(|c| c.is_ascii_graphic())
}

/// 요청이 내민 토큰으로 세션을 확인하거나 새로 발급합니다.
///
/// ## 매개변수
/// - `presented`: 쿠키에서 꺼낸 토큰 (없으면 `None`)
/// - `now`: 판정 기준 시각. `expires_at == now`인 세션은 만료된 것으로 봅니다.
///
/// `conn`은 `&SqlitePool`이거나 트랜잭션 연결(`&mut *tx`)입니다.
/// 트랜잭션 안에서 호출하면 새 세션 행도 그 트랜잭션과 함께 커밋/롤백됩니다.
///
/// ## 에러
/// DB에 접근하지 못하면 에러를 그대로 돌려줍니다. 세션 없이 요청을 계속 처리하지 않습니다.
pub fn resolve_session<'a, 'p, A>(
    conn: A,
    presented: Option<&'p str>,
    now: DateTime<Utc>,
) -> impl Future<Output = Result<ResolvedSession, AppError>> + Send + use<'a, 'p, A>
where
    A: Acquire<'a, Database = Sqlite> + Send + 'a,
{
    async move {
        let mut conn = conn.acquire().await?;

        if let Some(token) = presented.filter(|t| is_plausible_token(t)) {
            if let Some(session) = db::find_session(&mut *conn, token).await? {
                if session.is_valid_at(now) {
                    return Ok(ResolvedSession {
                        id: session.id,
                        is_new: false,
                    });
                }
                tracing::debug!(session = %session.masked_id(), "Presented session has expired");
            }
        }

        create_session(&mut *conn, now).await
    }
}

/// 새 세션을 발급하여 저장합니다. 만료 시각은 `now + 30일`로 고정됩니다.
pub async fn create_session(
    executor: impl SqliteExecutor<'_>,
    now: DateTime<Utc>,
) -> Result<ResolvedSession, AppError> {
    let id = generate_session_id();
    let session = db::insert_session(
        executor,
        &id,
        &format_timestamp(now),
        &format_timestamp(now + session_ttl()),
    )
    .await?;

    tracing::debug!(session = %session.masked_id(), expires_at = %session.expires_at, "Created new session");

    Ok(ResolvedSession {
        id: session.id,
        is_new: true,
    })
}

/// `now` 기준으로 만료된 세션을 삭제합니다. 조회 기록은 남습니다.
pub async fn purge_expired_sessions(
    executor: impl SqliteExecutor<'_>,
    now: DateTime<Utc>,
) -> Result<u64, AppError> {
    db::delete_expired_sessions(executor, &format_timestamp(now)).await
}

/// 만료 세션을 주기적으로 정리하는 백그라운드 작업을 띄웁니다.
///
/// 정리에 실패하면 경고만 남기고 다음 주기에 다시 시도합니다.
pub fn spawn_session_reaper(pool: SqlitePool, every: StdDuration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // 첫 tick은 즉시 완료되므로 시작 직후 한 번 정리합니다.
        loop {
            ticker.tick().await;
            match purge_expired_sessions(&pool, Utc::now()).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged expired sessions"),
                Err(e) => tracing::warn!("Failed to purge expired sessions: {}", e),
            }
        }
    })
}
