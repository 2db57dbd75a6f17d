//! # 방문자 세션 모델 정의
//!
//! 로그인 없이 방문자를 구분하기 위한 익명 세션입니다.
//! 세션은 생성 후 변경되지 않으며, 만료 시각은 생성 시점 기준 30일로 고정됩니다
//! (요청마다 연장되는 sliding 방식이 아님).

use chrono::{DateTime, Duration, Utc};
use super::parse_timestamp;

/// 세션 쿠키 이름
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// 세션 수명 (30일)
pub const SESSION_TTL_DAYS: i64 = 30;

/// 세션 수명을 `chrono::Duration`으로 반환합니다.
pub fn session_ttl() -> Duration {
    Duration::days(SESSION_TTL_DAYS)
}

/// 세션 엔티티 — DB의 `sessions` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// 불투명한 세션 토큰 (256비트 난수의 16진수 표현)
    pub id: String,
    /// 생성 시각 (ISO 8601 형식: "2026-02-16T12:00:00.000Z")
    pub created_at: String,
    /// 만료 시각 — 이 시각 이후(같은 시각 포함)에는 무효
    pub expires_at: String,
}

impl Session {
    /// `now` 시점에 유효한 세션인지 확인합니다.
    ///
    /// `expires_at`이 `now`보다 엄격하게 미래일 때만 유효합니다.
    /// 만료 시각을 파싱할 수 없는 행은 무효로 취급합니다.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match parse_timestamp(&self.expires_at) {
            Some(expires_at) => expires_at > now,
            None => {
                tracing::warn!(session = %self.masked_id(), "Unparseable session expiry: {}", self.expires_at);
                false
            }
        }
    }

    /// 로그에 남길 수 있는 부분 세션 ID
    pub fn masked_id(&self) -> String {
        mask_session_id(&self.id)
    }
}

/// 세션 ID를 앞 8글자와 생략 부호로 가립니다.
///
/// 조회 상세 정보에서 원본 세션 ID를 노출하지 않기 위한 부분 공개 형식입니다.
/// 예: "3fa85f6457174562..." → "3fa85f64..."
pub fn mask_session_id(id: &str) -> String {
    let prefix: String = id.chars().take(8).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format_timestamp;
    use chrono::TimeZone;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: "0123456789abcdef".to_string(),
            created_at: format_timestamp(expires_at - session_ttl()),
            expires_at: format_timestamp(expires_at),
        }
    }

    #[test]
    fn session_is_expired_at_exact_expiry() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert!(!session_expiring_at(now).is_valid_at(now));
        assert!(session_expiring_at(now + Duration::milliseconds(1)).is_valid_at(now));
        assert!(!session_expiring_at(now - Duration::seconds(1)).is_valid_at(now));
    }

    #[test]
    fn corrupt_expiry_is_invalid() {
        let mut session = session_expiring_at(Utc::now() + session_ttl());
        session.expires_at = "not a date".to_string();
        assert!(!session.is_valid_at(Utc::now()));
    }

    #[test]
    fn mask_keeps_first_eight_chars() {
        assert_eq!(mask_session_id("0123456789abcdef"), "01234567...");
        assert_eq!(mask_session_id("abc"), "abc...");
    }
}
