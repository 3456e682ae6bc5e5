//! API 라우트 설정 모듈
//!
//! 엔드포인트를 인증 수준별 스코프로 묶어 등록합니다.
//!
//! | 스코프 | 인증 |
//! |---|---|
//! | `/health` | 없음 |
//! | `/api/v1/billing` | 선택 (`/portal`만 사용자 필수, `/webhook`은 서명) |
//! | `/api/v1/auth` | 일회용 로그인 토큰 |
//! | `/api/v1/conversions` | 선택 (토큰이 있으면 사용자 ID 사용) |
//! | `/api/v1/referrals/track` | 없음 |
//! | `/api/v1/me` | 사용자 JWT |
//! | `/api/v1/admin` | 사용자 JWT + `admin` 역할 |
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::handlers;
use crate::errors::errors::AppError;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 모든 라우트와 추출기 설정을 등록합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(health_check);

    configure_billing_routes(cfg);
    configure_auth_routes(cfg);
    configure_public_routes(cfg);
    configure_dashboard_routes(cfg);
    configure_admin_routes(cfg);
}

/// JSON/쿼리 파싱 실패도 `{"data": null, "error": ...}` 400 응답으로 맞춥니다.
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    );
}

/// 결제 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/billing/checkout \
///   -H "Content-Type: application/json" \
///   -d '{"priceId":"price_123","planName":"Pro","customerEmail":"buyer@example.com"}'
/// ```
///
/// 스코프는 선택 인증이며, 빌링 포털은 `AuthenticatedUser` 추출기가 토큰 없는 요청을 401로 막습니다.
fn configure_billing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/billing")
            .wrap(AuthMiddleware::optional())
            .service(handlers::billing::create_checkout)
            .service(handlers::billing::get_checkout_session)
            .service(handlers::billing::create_portal_session)
            .service(handlers::billing::stripe_webhook)
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::login_token::exchange_login_token)
    );
}

fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/conversions")
            .wrap(AuthMiddleware::optional())
            .service(handlers::public::track_conversion)
    );

    cfg.service(
        web::scope("/api/v1/referrals")
            .service(handlers::public::track_referral)
    );
}

fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(AuthMiddleware::required())
            .service(handlers::dashboard::my_lists)
            .service(handlers::dashboard::my_funnel)
            .service(handlers::dashboard::my_message_stats)
            .service(handlers::dashboard::my_usage)
            .service(handlers::dashboard::my_subscription)
            .service(handlers::dashboard::my_referral_code)
            .service(handlers::dashboard::my_referrals)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(AuthMiddleware::required_with_role("admin"))
            .service(handlers::admin::list_users)
            .service(handlers::admin::set_user_role)
            .service(handlers::admin::delete_user)
            .service(handlers::admin::conversion_report)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "leadflow_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "Hosted REST",
            "payments": "Stripe",
            "cache": "Redis"
        }
    }))
}
