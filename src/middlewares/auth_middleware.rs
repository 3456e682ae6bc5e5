//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 대시보드 JWT를 검증하고 사용자 정보를 추출합니다.
//! 검증에 성공하면 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)가
//! Request Extensions에 저장되어 핸들러 인자로 받을 수 있습니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    /// 역할 요구사항이 있는 인증 미들웨어 생성
    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(
            AuthMode::Required,
            RequiredRole::Single(role.to_string())
        )
    }

}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use chrono::Duration;
    use crate::config::BackendConfig;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::token_service::tests::dashboard_token;

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    async fn maybe_whoami(user: Option<AuthenticatedUser>) -> HttpResponse {
        HttpResponse::Ok().body(user.map(|u| u.user_id).unwrap_or_else(|| "anonymous".to_string()))
    }

    fn bearer(roles: &[&str]) -> (&'static str, String) {
        let token = dashboard_token("u1", roles, &BackendConfig::jwt_secret(), Duration::hours(1));
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_required_without_token_is_401_envelope() {
        let app = test::init_service(
            App::new().service(web::scope("/me").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["data"].is_null());
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_required_with_valid_token_passes_user() {
        let app = test::init_service(
            App::new().service(web::scope("/me").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").insert_header(bearer(&[])).to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body, "u1");
    }

    #[actix_web::test]
    async fn test_admin_scope_rejects_plain_user_with_403() {
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::required_with_role("admin"))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let user_req = test::TestRequest::get().uri("/admin").insert_header(bearer(&["user"])).to_request();
        assert_eq!(test::call_service(&app, user_req).await.status(), 403);

        let admin_req = test::TestRequest::get().uri("/admin").insert_header(bearer(&["admin"])).to_request();
        assert_eq!(test::call_service(&app, admin_req).await.status(), 200);
    }

    #[actix_web::test]
    async fn test_optional_mode_lets_anonymous_through() {
        let app = test::init_service(
            App::new().service(
                web::scope("/track").wrap(AuthMiddleware::optional()).route("", web::post().to(maybe_whoami)),
            ),
        )
        .await;

        let anonymous = test::call_and_read_body(&app, test::TestRequest::post().uri("/track").to_request()).await;
        assert_eq!(anonymous, "anonymous");

        let req = test::TestRequest::post().uri("/track").insert_header(bearer(&[])).to_request();
        assert_eq!(test::call_and_read_body(&app, req).await, "u1");
    }
}
