//! 대시보드 액세스 토큰 검증 서비스
//!
//! 호스티드 Auth가 발급한 HS256 JWT를 백엔드 JWT 비밀키로 검증하고
//! [`AuthenticatedUser`]로 변환합니다. 앱 역할은 `app_metadata.roles`에 있습니다.

use std::sync::Arc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use once_cell::sync::OnceCell;
use crate::config::BackendConfig;
use crate::domain::models::auth::{AuthenticatedUser, UserClaims};
use crate::errors::errors::AppError;

pub struct TokenService {
    secret: String,
}

static TOKEN_SERVICE_INSTANCE: OnceCell<Arc<TokenService>> = OnceCell::new();

impl TokenService {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn instance() -> Arc<Self> {
        TOKEN_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(BackendConfig::jwt_secret())))
            .clone()
    }

    /// 서명과 만료를 검증합니다. 대상(`aud`)은 검사하지 않습니다.
    pub fn verify_token(&self, token: &str) -> Result<UserClaims, AppError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_aud = false;

        decode::<UserClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                },
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.verify_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            roles: claims.app_metadata.roles,
        })
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
        }
    }
}

fn token_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(TokenService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "token_service",
        constructor: token_service_constructor,
    }
}
