//! # 대시보드 핸들러 (`/api/v1/me`)
//!
//! 로그인한 사용자 본인의 데이터만 조회합니다. 사용자 ID는 항상 JWT의 `sub`에서 오며
//! 요청 파라미터로 받지 않습니다. 응답은 `{"data": ..., "error": null}` 봉투입니다.

use actix_web::{get, HttpResponse};
use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::stats::ReferralCode;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::billing::SubscriptionService;
use crate::services::referrals::ReferralService;
use crate::services::stats::{FunnelService, UsageService};

/// 연락처 리스트와 리스트별 프로필 수
#[get("/lists")]
pub async fn my_lists(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let lists = FunnelService::instance().lists_for_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(lists)))
}

/// 리스트별 8단계 퍼널
#[get("/funnel")]
pub async fn my_funnel(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let funnels = FunnelService::instance().funnel_for_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(funnels)))
}

#[get("/messages/stats")]
pub async fn my_message_stats(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let breakdown = FunnelService::instance()
        .message_breakdown_for_user(&user.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(breakdown)))
}

#[get("/usage")]
pub async fn my_usage(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let usage = UsageService::instance().usage_for_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(usage)))
}

#[get("/subscription")]
pub async fn my_subscription(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let overview = SubscriptionService::instance().overview(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(overview)))
}

/// 미전환 추천 코드가 있으면 재사용하고 없으면 새로 발급합니다.
#[get("/referral-code")]
pub async fn my_referral_code(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let code = ReferralService::instance().get_or_create_code(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(ReferralCode { code })))
}

#[get("/referrals")]
pub async fn my_referrals(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let stats = ReferralService::instance().stats_for_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(stats)))
}
