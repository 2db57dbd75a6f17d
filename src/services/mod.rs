//! # 서비스(비즈니스 로직) 모듈
//!
//! - `sessions`: 세션 저장소 — 토큰 확인/발급, 만료 세션 정리
//! - `views`: 조회 원장과 집계 — 중복 없는 기록, 고유 조회수, 최근 조회
//! - `tracker`: 수집 파사드 — 세션 확인 → 조회 기록 → 보고서
//! - `html`: 조회수 HTML 페이지 렌더링

pub mod html;
pub mod sessions;
pub mod tracker;
pub mod views;

pub use sessions::ResolvedSession;
pub use tracker::track_and_report;
