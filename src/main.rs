//! 리드 수집 SaaS 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 호스티드 백엔드, 결제 프로바이더, Redis 클라이언트를 등록한 뒤 REST API를 제공합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use leadflow_backend::caching::redis::RedisClient;
use leadflow_backend::config::{Environment, RateLimitConfig, ServerConfig, SiteConfig};
use leadflow_backend::core::registry::ServiceLocator;
use leadflow_backend::db::Database;
use leadflow_backend::routes::configure_all_routes;
use leadflow_backend::services::billing::StripeClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 리드플로우 백엔드 시작중... ({:?})", Environment::current());

    let (database, redis_client, stripe_client) = initialize_clients().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);
    ServiceLocator::set(stripe_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| std::io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어 순서: Rate Limiting → CORS → 접근 로그 → 경로 정규화
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = SiteConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG`가 없으면 `info,actix_web=info`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 호스티드 백엔드, Redis, 결제 프로바이더 클라이언트를 생성합니다
///
/// Redis는 기동 시 PING으로 연결을 확인하고, HTTP 클라이언트들은 첫 요청 때 연결합니다.
async fn initialize_clients() -> std::io::Result<(Arc<Database>, Arc<RedisClient>, Arc<StripeClient>)> {
    info!("📡 외부 서비스 클라이언트 생성 중...");

    let database = Database::new()
        .map_err(|e| std::io::Error::other(format!("호스티드 백엔드 클라이언트 생성 실패: {}", e)))?;

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| std::io::Error::other(format!("Redis 연결 실패: {}", e)))?;

    let stripe_client = StripeClient::new()
        .map_err(|e| std::io::Error::other(format!("결제 프로바이더 클라이언트 생성 실패: {}", e)))?;

    Ok((Arc::new(database), Arc::new(redis_client), Arc::new(stripe_client)))
}

/// CORS 설정을 구성합니다
///
/// 허용 Origin은 `SITE_URL`과 로컬 개발 서버입니다. 결제 프로바이더 웹훅은
/// 서버 간 호출이라 CORS와 무관하지만 `Stripe-Signature` 헤더도 허용 목록에 둡니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .allowed_header("stripe-signature")
        .supports_credentials()
        .max_age(3600)
}
