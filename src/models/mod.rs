//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `session`: 익명 방문자 세션
//! - `view`: 최근 조회 행과 집계 결과 구조체
//!
//! 시각은 DB에 `TIMESTAMP_FORMAT` 형식의 TEXT로 저장됩니다.
//! 고정 자릿수 UTC 형식이므로 문자열 비교가 곧 시간 비교가 됩니다.

pub mod session;
pub mod view;

pub use session::*;
pub use view::*;

use chrono::{DateTime, Utc};

/// DB에 저장하는 시각 형식 (예: "2026-02-16T12:00:00.000Z")
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// UTC 시각을 저장용 문자열로 변환합니다.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// 저장된 시각 문자열을 UTC 시각으로 파싱합니다. 형식이 깨져 있으면 `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_survive_storage_format() {
        let at = Utc.with_ymd_and_hms(2026, 2, 16, 12, 0, 0).unwrap();
        let stored = format_timestamp(at);
        assert_eq!(stored, "2026-02-16T12:00:00.000Z");
        assert_eq!(parse_timestamp(&stored), Some(at));
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
