//! # 조회수 HTML 페이지 렌더링
//!
//! `GET /views`가 돌려주는 두 페이지를 문자열로 만듭니다.
//! - 전체 목록: 추적 중인 페이지 수, 고유 조회수 합계, URL별 조회수 표
//! - 상세: URL 하나의 고유 조회수와 최근 조회 표
//!
//! URL은 사용자가 보낸 값이므로 HTML에 넣기 전에 반드시 이스케이프합니다.

use std::fmt::Write;

use crate::models::{parse_timestamp, ViewDetails, ViewSummary};

const STYLE: &str = r#"
    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
    .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
    h1 { color: #333; margin-top: 0; }
    .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 20px 0; }
    .stat-card { background: #f8f9fa; padding: 20px; border-radius: 6px; text-align: center; }
    .stat-number, .stat { font-size: 36px; font-weight: bold; color: #007bff; }
    .stat-label { color: #666; margin-top: 5px; }
    .url { color: #666; font-family: monospace; background: #f8f9fa; padding: 10px; border-radius: 4px; word-break: break-all; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; }
    th, td { text-align: left; padding: 12px; border-bottom: 1px solid #ddd; }
    th { background: #f8f9fa; font-weight: 600; }
    .url-link, .back-link { color: #007bff; text-decoration: none; }
    .url-link { font-family: monospace; }
    .view-count { font-weight: 600; color: #28a745; }
    .session-id { font-family: monospace; font-size: 12px; color: #999; }
    .empty-state { text-align: center; padding: 40px; color: #999; }
"#;

/// HTML 특수문자를 엔티티로 바꿉니다.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 쿼리 파라미터 값으로 넣을 수 있게 퍼센트 인코딩합니다. (RFC 3986 unreserved 문자만 그대로 둠)
pub fn encode_query_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

/// 저장된 시각을 사람이 읽기 쉬운 형태로 바꿉니다. 파싱할 수 없으면 원문 그대로.
fn display_time(stored: &str) -> String {
    parse_timestamp(stored)
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| stored.to_string())
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>{STYLE}</style>
</head>
<body>
  <div class="container">
{body}
  </div>
</body>
</html>
"#
    )
}

/// 전체 URL 목록 페이지
pub fn render_summary_page(summary: &ViewSummary) -> String {
    let mut body = String::new();
    body.push_str("    <h1>All Page Views</h1>\n");
    let _ = write!(
        body,
        r#"    <div class="stats">
      <div class="stat-card"><div class="stat-number">{}</div><div class="stat-label">Total Pages</div></div>
      <div class="stat-card"><div class="stat-number">{}</div><div class="stat-label">Total Unique Views</div></div>
    </div>
"#,
        summary.total_urls,
        summary.total_unique_views()
    );

    if summary.views.is_empty() {
        body.push_str(
            r#"    <div class="empty-state">
      <p>No page views recorded yet.</p>
      <p>Visit some pages with <code>?url=/page-name</code> to track views!</p>
    </div>
"#,
        );
    } else {
        body.push_str("    <table>\n      <thead><tr><th>Page URL</th><th>Unique Views</th></tr></thead>\n      <tbody>\n");
        for view in &summary.views {
            let _ = writeln!(
                body,
                r#"        <tr><td><a href="/views?url={}" class="url-link">{}</a></td><td class="view-count">{}</td></tr>"#,
                encode_query_component(&view.url),
                escape_html(&view.url),
                view.unique_views
            );
        }
        body.push_str("      </tbody>\n    </table>\n");
    }

    page("All Page Views", &body)
}

/// URL 하나의 상세 페이지
pub fn render_details_page(details: &ViewDetails) -> String {
    let url = escape_html(&details.url);
    let label = if details.unique_views == 1 { "View" } else { "Views" };

    let mut body = String::new();
    let _ = write!(
        body,
        r#"    <h1>Page View Statistics</h1>
    <div class="url">{url}</div>
    <div class="stat">{}</div>
    <p>Unique {label}</p>
    <h2>Recent Views</h2>
    <table>
      <thead><tr><th>Time</th><th>Session</th></tr></thead>
      <tbody>
"#,
        details.unique_views
    );
    for view in &details.recent_views {
        let _ = writeln!(
            body,
            r#"        <tr><td>{}</td><td class="session-id">{}</td></tr>"#,
            escape_html(&display_time(&view.viewed_at)),
            escape_html(&view.session_id_masked)
        );
    }
    body.push_str("      </tbody>\n    </table>\n    <a href=\"/views\" class=\"back-link\">&larr; Back to all pages</a>\n");

    page(&format!("View Stats - {}", url), &body)
}
