//! 일회용 로그인 토큰 교환 핸들러

use actix_web::{post, web, HttpResponse};
use crate::domain::dto::tokens::ExchangeLoginTokenRequest;
use crate::errors::errors::AppError;
use crate::services::auth::LoginTokenService;

/// 결제 완료 페이지가 받은 토큰을 세션(액세스/리프레시 토큰)으로 교환합니다.
///
/// 같은 토큰의 두 번째 교환은 401입니다.
#[post("/login-token/exchange")]
pub async fn exchange_login_token(
    payload: web::Json<ExchangeLoginTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let token = payload.into_inner().token;
    if token.trim().is_empty() {
        return Err(AppError::ValidationError("token은(는) 필수입니다".to_string()));
    }

    let session = LoginTokenService::instance().exchange(token.trim()).await?;
    Ok(HttpResponse::Ok().json(session))
}
