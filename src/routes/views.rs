//! # 조회수 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/views | `views_json` | 전체 URL 조회수 (JSON) |
//! | GET | /api/views?url=/page | `views_json` | URL 하나의 상세 정보 (JSON) |
//! | GET | /views | `views_html` | 전체 URL 조회수 (HTML) |
//! | GET | /views?url=/page | `views_html` | URL 하나의 상세 정보 (HTML) |
//!
//! ## 어떤 URL이 기록되는가
//! - `/api/views`: `url`이 있으면 그 URL, 없으면 요청 경로 `/api/views` 자체
//! - `/views`: 항상 `/views` 자체
//!
//! 두 핸들러 모두 수집 파사드(`services::track_and_report`) 하나만 호출하고,
//! 새 세션이 발급되었으면 응답에 세션 쿠키를 붙입니다.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::AppError,
    middleware::session::{attach_session_cookie, SessionToken},
    models::ViewReport,
    routes::AppState,
    services::{html, track_and_report, views::normalize_url},
};

/// JSON API 경로. `url` 없이 호출되면 이 경로의 조회로 기록됩니다.
pub const API_VIEWS_PATH: &str = "/api/views";

/// HTML 페이지 경로. 방문할 때마다 이 경로의 조회로 기록됩니다.
pub const VIEWS_PAGE_PATH: &str = "/views";

/// `?url=/page-name` 쿼리 파라미터
#[derive(Debug, Deserialize)]
pub struct ViewsQuery {
    /// 상세 정보를 볼 URL (선택)
    pub url: Option<String>,
}

/// `GET /api/views[?url=...]`
///
/// - `url` 없음 → `{ "totalUrls": 2, "views": [{ "url": "/a", "uniqueViews": 3 }, ...] }`
/// - `url` 있음 → `{ "url": "/a", "uniqueViews": 3, "recentViews": [{ "viewedAt", "sessionIdMasked" }] }`
pub async fn views_json(
    State(state): State<AppState>,
    token: SessionToken,
    Query(query): Query<ViewsQuery>,
) -> Result<Response, AppError> {
    let detail_url = normalize_url(query.url.as_deref())?;
    let target_url = detail_url.as_deref().unwrap_or(API_VIEWS_PATH);

    let tracked = track_and_report(
        &state.pool,
        token.as_deref(),
        target_url,
        detail_url.as_deref(),
        Utc::now(),
    )
    .await?;

    attach_session_cookie(Json(tracked.report).into_response(), &tracked.session)
}

/// `GET /views[?url=...]` — 같은 내용을 HTML 페이지로 보여줍니다.
pub async fn views_html(
    State(state): State<AppState>,
    token: SessionToken,
    Query(query): Query<ViewsQuery>,
) -> Result<Response, AppError> {
    let detail_url = normalize_url(query.url.as_deref())?;

    let tracked = track_and_report(
        &state.pool,
        token.as_deref(),
        VIEWS_PAGE_PATH,
        detail_url.as_deref(),
        Utc::now(),
    )
    .await?;

    let page = match &tracked.report {
        ViewReport::Summary(summary) => html::render_summary_page(summary),
        ViewReport::Details(details) => html::render_details_page(details),
    };

    attach_session_cookie(Html(page).into_response(), &tracked.session)
}

#[cfg(test)]
mod tests {
    use crate::{
        db::test_pool,
        routes::{router, AppState},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
            Request, StatusCode,
        },
        response::Response,
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app() -> Router {
        router(AppState { pool: test_pool().await })
    }

    async fn get(app: &Router, uri: &str, session: Option<&str>) -> Response {
        let mut request = Request::get(uri);
        if let Some(id) = session {
            request = request.header(COOKIE, format!("session_id={}", id));
        }
        app.clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn issued_session(response: &Response) -> Option<String> {
        let header = response.headers().get(SET_COOKIE)?.to_str().ok()?;
        let pair = header.split(';').next()?;
        pair.strip_prefix("session_id=").map(str::to_string)
    }

    async fn json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn first_request_issues_cookie_and_counts_api_path() {
        let app = app().await;
        let response = get(&app, "/api/views", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=2592000"));

        let body = json(response).await;
        assert_eq!(body["totalUrls"], 1);
        assert_eq!(body["views"][0]["url"], "/api/views");
        assert_eq!(body["views"][0]["uniqueViews"], 1);
    }

    #[tokio::test]
    async fn returning_session_gets_no_cookie_and_no_recount() {
        let app = app().await;
        let session = issued_session(&get(&app, "/api/views", None).await).unwrap();

        let response = get(&app, "/api/views", Some(&session)).await;
        assert!(response.headers().get(SET_COOKIE).is_none());
        let body = json(response).await;
        assert_eq!(body["views"][0]["uniqueViews"], 1);
    }

    #[tokio::test]
    async fn unknown_cookie_is_replaced() {
        let app = app().await;
        let response = get(&app, "/api/views", Some("forged-token")).await;

        let issued = issued_session(&response).unwrap();
        assert_ne!(issued, "forged-token");
    }

    #[tokio::test]
    async fn detail_request_records_and_masks() {
        let app = app().await;
        let response = get(&app, "/api/views?url=/blog/post-1", None).await;
        let session = issued_session(&response).unwrap();

        let body = json(response).await;
        assert_eq!(body["url"], "/blog/post-1");
        assert_eq!(body["uniqueViews"], 1);
        let recent = body["recentViews"].as_array().unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0]["sessionIdMasked"], format!("{}...", &session[..8]));
        assert!(recent[0]["viewedAt"].is_string());

        // 같은 세션으로 다시 와도 1
        let again = json(get(&app, "/api/views?url=/blog/post-1", Some(&session)).await).await;
        assert_eq!(again["uniqueViews"], 1);
    }

    #[tokio::test]
    async fn empty_url_parameter_means_summary() {
        let app = app().await;
        let body = json(get(&app, "/api/views?url=", None).await).await;
        assert_eq!(body["totalUrls"], 1);
        assert_eq!(body["views"][0]["url"], "/api/views");
    }

    #[tokio::test]
    async fn oversized_url_is_rejected() {
        let app = app().await;
        let uri = format!("/api/views?url=/{}", "a".repeat(3000));
        let response = get(&app, &uri, None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn html_page_counts_itself() {
        let app = app().await;
        let response = get(&app, "/views", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let session = issued_session(&response).unwrap();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("All Page Views"));
        assert!(page.contains(r#"href="/views?url=%2Fviews""#));

        let summary = json(get(&app, "/api/views", Some(&session)).await).await;
        let views = summary["views"].as_array().unwrap();
        assert!(views.iter().any(|v| v["url"] == "/views" && v["uniqueViews"] == 1));
    }

    #[tokio::test]
    async fn html_detail_page_escapes_url() {
        let app = app().await;
        let response = get(&app, "/views?url=%3Cb%3Ebold%3C%2Fb%3E", None).await;
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(body.to_vec()).unwrap();

        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!page.contains("<b>bold</b>"));
        assert!(page.contains("Unique Views</p>"));
    }
}
