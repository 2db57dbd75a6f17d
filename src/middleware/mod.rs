//! # 미들웨어/추출자 모듈
//!
//! - `session`: 요청 쿠키에서 세션 토큰을 꺼내고, 새 세션이면 `Set-Cookie`를 붙입니다.

pub mod session;
