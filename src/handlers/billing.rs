//! # 결제 핸들러
//!
//! | 메서드 | 경로 | 인증 |
//! |---|---|---|
//! | POST | `/api/v1/billing/checkout` | 없음 |
//! | GET | `/api/v1/billing/checkout/{session_id}` | 없음 |
//! | POST | `/api/v1/billing/portal` | 사용자 |
//! | POST | `/api/v1/billing/webhook` | `Stripe-Signature` |
//!
//! 결제 응답은 프론트엔드가 기대하는 본문을 봉투 없이 그대로 반환합니다.
//! 필수 필드 검증은 서비스 호출 전에 끝나므로 검증 실패 시 업스트림 호출이 일어나지 않습니다.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use crate::domain::dto::billing::{CreateCheckoutRequest, CreatePortalRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::billing::{CheckoutService, WebhookService};

/// 구독 체크아웃 세션 생성
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/billing/checkout \
///   -H "Content-Type: application/json" \
///   -d '{"priceId":"price_123","planName":"Pro","customerEmail":"buyer@example.com"}'
/// ```
///
/// 응답: `{"sessionId": "cs_...", "url": "https://checkout.stripe.com/..."}`
#[post("/checkout")]
pub async fn create_checkout(
    payload: web::Json<CreateCheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner().validate()?;

    let created = CheckoutService::instance().create_checkout(request).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// 결제 완료 페이지의 세션 상태 조회. 결제가 끝났으면 `loginToken` 포함.
#[get("/checkout/{session_id}")]
pub async fn get_checkout_session(
    session_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let status = CheckoutService::instance().retrieve_session(&session_id).await?;
    Ok(HttpResponse::Ok().json(status))
}

#[post("/portal")]
pub async fn create_portal_session(
    user: AuthenticatedUser,
    payload: Option<web::Json<CreatePortalRequest>>,
) -> Result<HttpResponse, AppError> {
    let return_url = payload.and_then(|p| p.into_inner().return_url);

    let portal = CheckoutService::instance()
        .create_portal_session(&user.user_id, return_url)
        .await?;
    Ok(HttpResponse::Ok().json(portal))
}

/// 결제 프로바이더 웹훅
///
/// 서명 검증에 원본 바이트가 필요하므로 JSON 추출기 대신 `web::Bytes`로 받습니다.
#[post("/webhook")]
pub async fn stripe_webhook(
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get("Stripe-Signature")
        .and_then(|h| h.to_str().ok());

    let ack = WebhookService::instance().handle(&body, signature).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_checkout_without_email_is_400_before_any_upstream_call() {
        let app = test::init_service(
            App::new().service(web::scope("/api/v1/billing").service(create_checkout)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/billing/checkout")
            .set_json(serde_json::json!({"priceId": "price_1", "planName": "Pro"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["data"].is_null());
        assert!(body["error"].as_str().unwrap_or_default().contains("customerEmail"));
    }

    #[actix_web::test]
    async fn test_portal_requires_authenticated_user() {
        let app = test::init_service(
            App::new().service(web::scope("/api/v1/billing").service(create_portal_session)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/v1/billing/portal").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }
}
