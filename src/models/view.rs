//! # 조회 기록 및 집계 모델 정의
//!
//! - `RecentViewRow`: "이 세션이 이 URL을 이 시각에 봤다"는 불변 사실 중 최근 목록에 필요한 부분
//! - `UrlViewCount`, `ViewSummary`, `ViewDetails`, `RecentView`: 읽기 측 집계 결과
//!
//! 집계 구조체는 JSON API로 그대로 나가므로 필드 이름을 camelCase로 직렬화합니다.

use serde::Serialize;

use super::mask_session_id;

/// URL 최대 길이. 이보다 긴 값은 요청 단계에서 거절합니다.
pub const MAX_URL_LEN: usize = 2048;

/// 상세 조회에서 돌려주는 최근 조회 기록 수
pub const RECENT_VIEWS_LIMIT: i64 = 10;

/// 최근 조회 목록용 행 — `page_views` 테이블에서 필요한 열만 읽습니다.
///
/// 테이블의 한 행은 `(url, session_id, viewed_at)`이며 `(url, session_id)` 쌍은
/// 로그 전체에서 유일합니다. `session_id`는 세션을 소유하지 않는 참조이므로,
/// 세션이 정리되어도 기록은 남습니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentViewRow {
    pub session_id: String,
    pub viewed_at: String,
}

/// 조회 기록 시도의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOutcome {
    /// 새 행이 추가되었으면 true, 이미 있던 `(url, session_id)`이면 false
    pub recorded: bool,
}

/// URL 하나의 고유 조회수
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UrlViewCount {
    pub url: String,
    pub unique_views: i64,
}

/// 전체 URL 조회수 목록 — `GET /api/views` 응답 본문
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    /// 한 번이라도 조회된 서로 다른 URL의 수
    pub total_urls: usize,
    /// 고유 조회수 내림차순
    pub views: Vec<UrlViewCount>,
}

impl ViewSummary {
    pub fn new(views: Vec<UrlViewCount>) -> Self {
        Self {
            total_urls: views.len(),
            views,
        }
    }

    /// 모든 URL의 고유 조회수 합계
    pub fn total_unique_views(&self) -> i64 {
        self.views.iter().map(|v| v.unique_views).sum()
    }
}

/// 최근 조회 한 건. 세션 ID는 가려진 형태로만 공개합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentView {
    pub viewed_at: String,
    pub session_id_masked: String,
}

impl From<RecentViewRow> for RecentView {
    fn from(record: RecentViewRow) -> Self {
        Self {
            session_id_masked: mask_session_id(&record.session_id),
            viewed_at: record.viewed_at,
        }
    }
}

/// URL 하나의 상세 조회 정보 — `GET /api/views?url=...` 응답 본문
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDetails {
    pub url: String,
    pub unique_views: i64,
    /// 최신순, 최대 `RECENT_VIEWS_LIMIT`건
    pub recent_views: Vec<RecentView>,
}

/// 수집 파사드가 돌려주는 보고서
///
/// `untagged`: 감싸는 태그 없이 안쪽 구조체의 JSON을 그대로 내보냅니다.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ViewReport {
    Summary(ViewSummary),
    Details(ViewDetails),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recent_view_masks_session_id() {
        let record = RecentViewRow {
            session_id: "a1b2c3d4e5f60718293a4b5c6d7e8f90".to_string(),
            viewed_at: "2026-02-16T12:00:00.000Z".to_string(),
        };
        let view = RecentView::from(record);
        assert_eq!(view.session_id_masked, "a1b2c3d4...");
        assert_eq!(view.viewed_at, "2026-02-16T12:00:00.000Z");
    }

    #[test]
    fn reports_serialize_in_camel_case_without_tag() {
        let summary = ViewReport::Summary(ViewSummary::new(vec![UrlViewCount {
            url: "/a".to_string(),
            unique_views: 2,
        }]));
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "totalUrls": 1, "views": [{ "url": "/a", "uniqueViews": 2 }] })
        );

        let details = ViewReport::Details(ViewDetails {
            url: "/never-visited".to_string(),
            unique_views: 0,
            recent_views: vec![],
        });
        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({ "url": "/never-visited", "uniqueViews": 0, "recentViews": [] })
        );
    }

    #[test]
    fn summary_totals_unique_views() {
        let summary = ViewSummary::new(vec![
            UrlViewCount { url: "/b".to_string(), unique_views: 5 },
            UrlViewCount { url: "/a".to_string(), unique_views: 3 },
        ]);
        assert_eq!(summary.total_urls, 2);
        assert_eq!(summary.total_unique_views(), 8);
    }
}
