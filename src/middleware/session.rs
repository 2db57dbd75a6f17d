use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderValue,
    },
    response::Response,
};

use crate::{
    error::AppError,
    models::{SESSION_COOKIE_NAME, SESSION_TTL_DAYS},
    services::ResolvedSession,
};

/// 쿠키 Max-Age (초 단위, 30일)
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = SESSION_TTL_DAYS * 24 * 60 * 60;

/// 요청의 `Cookie` 헤더에서 꺼낸 세션 토큰
///
/// 토큰의 유효성은 여기서 판단하지 않습니다. 수집 파사드가 세션 저장소에 확인합니다.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<String>);

impl SessionToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|header| find_cookie(header, SESSION_COOKIE_NAME));

        Ok(SessionToken(token))
    }
}

/// `Cookie` 헤더 값에서 이름이 `name`인 쿠키 값을 찾습니다.
///
/// 형식: `a=1; session_id=abc; b=2`
fn find_cookie(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim().trim_matches('"').to_string())
    })
}

/// 새 세션을 알리는 `Set-Cookie` 값
pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        SESSION_COOKIE_NAME, session_id, SESSION_COOKIE_MAX_AGE_SECS
    )
}

/// 세션이 이번 요청에서 발급되었으면 응답에 세션 쿠키를 붙입니다.
///
/// 기존 세션이면 응답을 건드리지 않습니다.
pub fn attach_session_cookie(
    mut response: Response,
    session: &ResolvedSession,
) -> Result<Response, AppError> {
    if session.is_new {
        let value = HeaderValue::from_str(&session_cookie(&session.id))
            .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}
