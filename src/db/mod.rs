//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `sessions`: 방문자 세션 생성/조회/정리 쿼리
//! - `views`: 조회 기록 삽입과 집계 쿼리
//!
//! 요청 간에 공유하는 메모리 상태는 없습니다. 모든 상태는 DB에 있고,
//! `(url, session_id)` 유일성도 DB 제약조건이 보장합니다.

pub mod sessions;
pub mod views;

pub use sessions::*;
pub use views::*;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// SQLite 연결 풀을 만들고 마이그레이션을 적용합니다.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// 테스트용 인메모리 DB 풀
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결을 하나로 고정하고,
/// 유휴 연결이 닫혀 DB가 사라지지 않도록 수명 제한을 끕니다.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}
