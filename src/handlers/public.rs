//! 공개 수집 엔드포인트 (전환 이벤트, 추천 코드 사용)

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::conversions::{TrackConversionRequest, TrackReferralRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::referrals::ReferralService;
use crate::services::stats::ConversionService;
use crate::utils::string_utils::require_field;

/// 전환 이벤트 기록
///
/// 로그인 상태로 호출하면 `userId`가 비어 있을 때 토큰의 사용자 ID로 채웁니다.
#[post("")]
pub async fn track_conversion(
    user: Option<AuthenticatedUser>,
    payload: web::Json<TrackConversionRequest>,
) -> Result<HttpResponse, AppError> {
    let mut request = payload.into_inner();
    if request.user_id.is_none() {
        request.user_id = user.map(|u| u.user_id);
    }

    ConversionService::instance().track(request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(serde_json::json!({ "recorded": true }))))
}

/// 추천 코드가 어떤 이메일로 사용되었는지 기록
#[post("/track")]
pub async fn track_referral(
    payload: web::Json<TrackReferralRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    request
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let code = require_field(request.code.as_deref(), "code")?;
    let email = require_field(request.email.as_deref(), "email")?;

    ReferralService::instance().track_referral(&code, &email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "tracked": true }))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_track_referral_validates_before_lookup() {
        let app = test::init_service(
            App::new().service(actix_web::web::scope("/api/v1/referrals").service(track_referral)),
        )
        .await;

        let bad_email = test::TestRequest::post()
            .uri("/api/v1/referrals/track")
            .set_json(serde_json::json!({"code": "AB12CD34", "email": "nope"}))
            .to_request();
        assert_eq!(test::call_service(&app, bad_email).await.status(), 400);

        let missing_code = test::TestRequest::post()
            .uri("/api/v1/referrals/track")
            .set_json(serde_json::json!({"email": "lead@example.com"}))
            .to_request();
        assert_eq!(test::call_service(&app, missing_code).await.status(), 400);
    }
}
