//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::errors::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let token_service = TokenService::instance();
            let auth_result = authenticate_request(&req, &token_service);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    return Ok(reject(req, err));
                },
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(&user.roles) {
                            log::warn!("권한 부족: 사용자 ID {} ({:?}), 필요 권한: {:?}",
                                user.user_id, user.roles, required);
                            let err = AppError::AuthorizationError("접근 권한이 부족합니다".to_string());
                            return Ok(reject(req, err));
                        }
                    }

                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                },
                // 토큰이 유효하면 사용자를 넣고, 없거나 틀려도 요청은 진행
                (AuthMode::Optional, Ok(user)) => {
                    log::debug!("선택적 인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                },
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 유효한 토큰 없음, 요청 진행");
                },
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// `{"data": null, "error": ...}` 응답으로 요청을 끝냅니다.
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// `Authorization: Bearer <jwt>` 헤더를 검증해 사용자 정보를 만듭니다.
fn authenticate_request(
    req: &ServiceRequest,
    token_service: &TokenService,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    token_service.authenticate(token)
}
