//! # WebWeaver 웹 서버 진입점
//!
//! 페이지 조회를 방문자 세션 단위로 중복 없이 기록하고,
//! URL별 고유 조회수와 최근 조회 이력을 보여주는 서버입니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성 및 마이그레이션
//! 4. 만료 세션 정리 작업 시작
//! 5. API 라우터와 정적 파일 서빙 설정
//! 6. HTTP 서버 시작

mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

use anyhow::Result;
use axum::Router;
use config::Config;
use routes::AppState;
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 webweaver, tower_http, axum 모듈을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webweaver=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting WebWeaver server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 + 마이그레이션 ──
    let pool = db::connect(&config.database_url, config.max_connections).await?;

    // ── 5단계: 만료 세션 정리 ──
    // 만료된 세션 행은 남아 있어도 무해하지만, 주기적으로 지워 테이블이 커지지 않게 합니다.
    match config.session_reap_interval {
        Some(every) => {
            services::sessions::spawn_session_reaper(pool.clone(), every);
            tracing::info!("Session reaper running every {}s", every.as_secs());
        }
        None => tracing::info!("Session reaper disabled"),
    }

    // ── 6단계: 라우터 설정 ──
    let api_routes = routes::router(AppState { pool });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 정적 파일 디렉토리가 있으면 랜딩 페이지(/)와 함께 서빙합니다.
    let public_dir = Path::new(&config.public_dir);
    let app = if public_dir.exists() {
        tracing::info!("Serving static files from {}", config.public_dir);
        Router::new()
            .merge(api_routes)
            .fallback_service(ServeDir::new(public_dir))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Public directory {} not found, serving API only", config.public_dir);
        Router::new()
            .merge(api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
