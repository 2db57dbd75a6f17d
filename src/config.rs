//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `PUBLIC_DIR`: 랜딩 페이지 등 정적 파일 디렉토리
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀의 최대 연결 수
//! - `SESSION_REAP_INTERVAL_SECS`: 만료 세션 정리 주기(초). 0이면 정리하지 않음

use std::env;
use std::time::Duration;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/webweaver.db?mode=rwc")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 5000)
    pub port: u16,
    /// 정적 파일 디렉토리 (기본값: "public")
    pub public_dir: String,
    /// 연결 풀의 최대 연결 수 (기본값: 5)
    pub max_connections: u32,
    /// 만료 세션 정리 주기 (기본값: 1시간). `None`이면 정리 작업을 띄우지 않습니다.
    pub session_reap_interval: Option<Duration>,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있고, 숫자로 파싱할 수 없는 값도 기본값으로 대체됩니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?, // 필수: 없으면 에러
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 5000),
            public_dir: env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5),
            session_reap_interval: reap_interval(parse_or("SESSION_REAP_INTERVAL_SECS", 3600)),
        })
    }
}

/// 환경변수를 읽어 `T`로 파싱합니다. 변수가 없거나 파싱에 실패하면 `default`를 반환합니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// 0초는 "정리 비활성화"를 뜻합니다.
fn reap_interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
