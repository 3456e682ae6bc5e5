//! # 관리자 핸들러 (`/api/v1/admin`)
//!
//! 라우트 스코프에 `AuthMiddleware::required_with_role("admin")`이 걸려 있어
//! `app_metadata.roles`에 `admin`이 없는 토큰은 403으로 끝납니다.

use actix_web::{delete, get, put, web, HttpResponse};
use crate::domain::dto::admin::SetRoleRequest;
use crate::domain::dto::common::{ApiResponse, PageQuery};
use crate::domain::dto::conversions::ConversionQuery;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::stats::ConversionService;
use crate::services::users::AdminUserService;

/// 사용자 목록 (`?page=1&per_page=20`, 최대 100)
#[get("/users")]
pub async fn list_users(query: web::Query<PageQuery>) -> Result<HttpResponse, AppError> {
    let page = AdminUserService::instance().list_users(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(page)))
}

#[put("/users/{user_id}/role")]
pub async fn set_user_role(
    admin: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<SetRoleRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("관리자 {} → 사용자 {} 역할 변경 요청", admin.user_id, user_id);

    let assigned = AdminUserService::instance()
        .set_role(&user_id, &payload.role)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(assigned)))
}

/// 사용자 삭제. 부분 실패 시 앞 단계의 삭제는 되돌리지 않습니다.
#[delete("/users/{user_id}")]
pub async fn delete_user(
    admin: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    if admin.user_id == *user_id {
        return Err(AppError::ValidationError("자기 자신은 삭제할 수 없습니다".to_string()));
    }
    log::warn!("관리자 {} → 사용자 {} 삭제 요청", admin.user_id, user_id);

    let deleted = AdminUserService::instance().delete_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(deleted)))
}

/// 전환 이벤트 리포트 (`?from=YYYY-MM-DD&to=YYYY-MM-DD`)
#[get("/conversions")]
pub async fn conversion_report(query: web::Query<ConversionQuery>) -> Result<HttpResponse, AppError> {
    let report = ConversionService::instance().report(&query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}
